#![forbid(unsafe_code)]

//! Cryptographic primitives of the River protocol core.
//!
//! Everything here is deterministic arithmetic over byte strings and big
//! integers; the randomness a primitive needs (RSA padding, DH private
//! keys) is drawn internally from the thread RNG. No module performs I/O.

pub mod dh;
pub mod envelope;
pub mod factor;
pub mod ige;
pub mod rsa;
pub mod srp;

mod hash;

pub use crate::hash::sha256;

use std::{error, fmt};

use num_bigint::BigUint;

/// Size in bytes of the auth key and of every padded group element.
pub const KEY_SIZE: usize = 256;

#[derive(Debug, Eq, PartialEq)]
pub enum CryptoError {
    /// A buffer handed to the block cipher is not a multiple of the block.
    UnalignedBuffer,
    /// A group element does not fit the protocol's 256-byte representation.
    ValueTooLarge,
    /// The RSA plaintext exceeds what the modulus can carry.
    MessageTooLong,
    /// The recomputed message key of a decrypted payload does not match the
    /// one on the frame.
    MessageKeyMismatch,
    /// A pinned key or group could not be parsed.
    MalformedKey,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::CryptoError::*;

        match self {
            UnalignedBuffer => write!(f, "buffer is not block aligned"),
            ValueTooLarge => write!(f, "value exceeds {} bytes", KEY_SIZE),
            MessageTooLong => write!(f, "message too long for the modulus"),
            MessageKeyMismatch => write!(f, "message key does not match the payload"),
            MalformedKey => write!(f, "malformed key material"),
        }
    }
}

impl error::Error for CryptoError {}

/// Big-endian bytes of `value`, left-padded with zeroes to [`KEY_SIZE`].
pub fn pad256(value: &BigUint) -> Result<[u8; KEY_SIZE], CryptoError> {
    let bytes = value.to_bytes_be();
    if bytes.len() > KEY_SIZE {
        return Err(CryptoError::ValueTooLarge);
    }

    let mut padded = [0; KEY_SIZE];
    padded[KEY_SIZE - bytes.len()..].copy_from_slice(&bytes);
    Ok(padded)
}
