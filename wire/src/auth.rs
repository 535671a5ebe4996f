use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use serde_derive::{Deserialize, Serialize};

/// Opens the handshake; carries the client's random nonce.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct InitConnect {
    pub client_nonce: u64,
}

/// The server's answer to [`InitConnect`]: both nonces, the identifiers of
/// the DH group and RSA key the client must use, and the factorization
/// challenge.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct InitResponse {
    pub client_nonce: u64,
    pub server_nonce: u64,
    pub dh_group_fingerprint: u64,
    pub pq: u64,
    pub rsa_pub_key_fingerprint: u64,
}

/// The client's second message: its DH public key, the solved factors with
/// `p < q`, and the RSA-sealed [`InitCompleteAuthInternal`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct InitCompleteAuth {
    pub client_nonce: u64,
    pub server_nonce: u64,
    pub client_dh_pub_key: Vec<u8>,
    pub p: u64,
    pub q: u64,
    pub encrypted_payload: Vec<u8>,
}

/// The proof payload only the pinned-key holder can read.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct InitCompleteAuthInternal {
    pub secret_nonce: Vec<u8>,
}

/// The server's final handshake message.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct InitAuthCompleted {
    pub status: AuthCompletedStatus,
    pub server_dh_pub_key: Vec<u8>,
    pub secret_hash: u64,
}

/// Terminal status of the handshake. The discriminant is the wire byte;
/// `Ok as u8` also feeds the secret-hash computation, so the values are part
/// of the protocol and must not change.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AuthCompletedStatus {
    Ok = 1,
    Retry = 2,
    Fail = 3,
}

impl Serialize for AuthCompletedStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

struct StatusVisitor;

impl<'de> Visitor<'de> for StatusVisitor {
    type Value = AuthCompletedStatus;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an auth completion status byte")
    }

    fn visit_u8<E>(self, v: u8) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            1 => Ok(AuthCompletedStatus::Ok),
            2 => Ok(AuthCompletedStatus::Retry),
            3 => Ok(AuthCompletedStatus::Fail),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(v as u64), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for AuthCompletedStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_u8(StatusVisitor)
    }
}
