use std::{error, fmt};

/// Every failure the core can surface to the host.
///
/// The first group are protocol-level conditions the host branches on; the
/// wrapping variants carry failures of the codec, the crypto primitives and
/// the state layer through unchanged.
#[derive(Debug)]
pub enum Error {
    /// A callback-producing operation ran before handlers were installed.
    HandlersNotSet,
    /// The server did not answer within the host's deadline.
    RequestTimeout,
    /// A message carried a constructor the operation does not accept.
    InvalidConstructor,
    /// The server's secret hash does not match the proof sent in step 2.
    SecretNonceMismatch,
    /// The server refused to create the auth key.
    AuthFailed,
    /// No usable connection state; the host must run the handshake.
    NoAuthKey,
    /// A fingerprint lookup found nothing.
    NotFound,
    /// The operation needs state that was never created.
    DoesNotExist,
    Base64(base64::DecodeError),
    Wire(wire::CodecError),
    Crypto(crypto::CryptoError),
    State(connection::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Error::*;

        match self {
            HandlersNotSet => write!(f, "handlers are not set"),
            RequestTimeout => write!(f, "request timeout"),
            InvalidConstructor => write!(f, "unexpected constructor"),
            SecretNonceMismatch => write!(f, "secret hash does not match"),
            AuthFailed => write!(f, "creating auth key failed"),
            NoAuthKey => write!(f, "no auth key"),
            NotFound => write!(f, "not found"),
            DoesNotExist => write!(f, "does not exist"),
            Base64(error) => write!(f, "base64 error: {}", error),
            Wire(error) => write!(f, "{}", error),
            Crypto(error) => write!(f, "crypto error: {}", error),
            State(error) => write!(f, "{}", error),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use self::Error::*;

        match self {
            Base64(error) => Some(error),
            Wire(error) => Some(error),
            Crypto(error) => Some(error),
            State(error) => Some(error),
            _ => None,
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
        Error::Wire(error)
    }
}

impl From<crypto::CryptoError> for Error {
    fn from(error: crypto::CryptoError) -> Self {
        Error::Crypto(error)
    }
}

impl From<connection::Error> for Error {
    fn from(error: connection::Error) -> Self {
        match error {
            connection::Error::NotFound => Error::NotFound,
            other => Error::State(other),
        }
    }
}
