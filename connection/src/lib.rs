#![forbid(unsafe_code)]

//! Pinned server keys and persisted connection state.
//!
//! Both halves are loaded from base64 blobs handed over by the embedding:
//! the key registry once at startup, the connection state whenever the host
//! restores a session. Neither performs I/O; persisting the state back is
//! the host's job.

mod registry;
mod state;

pub use crate::registry::ServerKeys;
pub use crate::state::Connection;

use std::{error, fmt};

#[derive(Debug)]
pub enum Error {
    /// No pinned key or group carries the requested fingerprint.
    NotFound,
    /// The blob is not valid base64.
    Base64(base64::DecodeError),
    /// The decoded blob does not deserialize.
    Codec(wire::CodecError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;

        match self {
            NotFound => write!(f, "not found"),
            Base64(error) => write!(f, "base64 error: {}", error),
            Codec(error) => write!(f, "{}", error),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::Error::*;

        match self {
            NotFound => None,
            Base64(error) => Some(error),
            Codec(error) => Some(error),
        }
    }
}

impl From<base64::DecodeError> for Error {
    fn from(error: base64::DecodeError) -> Self {
        Error::Base64(error)
    }
}

impl From<wire::CodecError> for Error {
    fn from(error: wire::CodecError) -> Self {
        Error::Codec(error)
    }
}
