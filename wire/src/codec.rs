use std::{error, fmt};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Failure raised by [`encode`] or [`decode`].
///
/// The protocol treats the codec as opaque, so the underlying reason is kept
/// only for diagnostics; callers branch on the fact of the failure, not on
/// its shape.
#[derive(Debug)]
pub struct CodecError(bincode::Error);

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "codec error: {}", self.0)
    }
}

impl error::Error for CodecError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&*self.0)
    }
}

impl From<bincode::Error> for CodecError {
    fn from(error: bincode::Error) -> Self {
        CodecError(error)
    }
}

/// Serializes a message into its wire bytes.
///
/// Integers are fixed-width little-endian, byte strings and sequences carry
/// a 64-bit length prefix. The output is deterministic: encoding the same
/// value twice yields identical bytes.
pub fn encode<T>(value: &T) -> Result<Vec<u8>, CodecError>
where
    T: Serialize,
{
    bincode::serialize(value).map_err(CodecError::from)
}

/// Deserializes a message from its wire bytes.
///
/// Trailing bytes after the message are ignored, which lets encrypted
/// payloads carry block-cipher padding transparently.
pub fn decode<T>(bytes: &[u8]) -> Result<T, CodecError>
where
    T: DeserializeOwned,
{
    bincode::deserialize(bytes).map_err(CodecError::from)
}
