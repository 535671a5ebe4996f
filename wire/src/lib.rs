#![forbid(unsafe_code)]

//! Message catalog and binary codec for the River wire protocol.
//!
//! Every message that crosses the wire is described here as a plain struct
//! with a serde implementation, and serialized through the deterministic
//! length-prefixed binary codec in [`codec`]. The numeric tag identifying a
//! message type inside an envelope lives in [`constructors`].

mod auth;
mod auth_key;
mod codec;
pub mod constructors;
mod envelope;
mod keys;
mod password;

pub use crate::auth::{
    AuthCompletedStatus, InitAuthCompleted, InitCompleteAuth, InitCompleteAuthInternal,
    InitConnect, InitResponse,
};
pub use crate::auth_key::AuthKey;
pub use crate::codec::{decode, encode, CodecError};
pub use crate::envelope::{
    KeyValue, MessageContainer, MessageEnvelope, ProtoEncryptedPayload, ProtoMessage, ServerError,
};
pub use crate::keys::{ConnectionInfo, DhGroup, PublicKey, ServerKeys};
pub use crate::password::{AccountPassword, InputPassword, PasswordAlgorithmVer6A};

#[cfg(any(test, feature = "testing"))]
pub mod testing;
