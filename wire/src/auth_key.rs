use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

/// The 256-byte shared secret derived by the handshake.
///
/// The size is fixed by the protocol (the DH shared secret left-padded to
/// 256 bytes), so the type carries a plain array and hand-written serde
/// rather than a heap buffer.
#[derive(Clone, Eq, PartialEq)]
pub struct AuthKey([u8; AuthKey::SIZE]);

impl AuthKey {
    pub const SIZE: usize = 256;

    pub fn as_bytes(&self) -> &[u8; AuthKey::SIZE] {
        &self.0
    }
}

impl Default for AuthKey {
    fn default() -> Self {
        AuthKey([0; AuthKey::SIZE])
    }
}

impl From<[u8; AuthKey::SIZE]> for AuthKey {
    fn from(bytes: [u8; AuthKey::SIZE]) -> Self {
        AuthKey(bytes)
    }
}

impl AsRef<[u8]> for AuthKey {
    fn as_ref(&self) -> &[u8] {
        &self.0[..]
    }
}

impl fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AuthKey [ {}.. ]", hex::encode(&self.0[..8]))
    }
}

impl Serialize for AuthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(&self.0[..])
    }
}

struct AuthKeyVisitor;

impl<'de> Visitor<'de> for AuthKeyVisitor {
    type Value = AuthKey;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bytes of key material", AuthKey::SIZE)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v.len() != AuthKey::SIZE {
            return Err(E::invalid_length(v.len(), &self));
        }
        let mut bytes = [0; AuthKey::SIZE];
        bytes.copy_from_slice(v);
        Ok(AuthKey(bytes))
    }
}

impl<'de> Deserialize<'de> for AuthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_bytes(AuthKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::AuthKey;
    use crate::codec::{decode, encode};

    #[test]
    fn round_trip_is_byte_exact() {
        let mut raw = [0u8; AuthKey::SIZE];
        for (i, byte) in raw.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let key = AuthKey::from(raw);

        let bytes = encode(&key).unwrap();
        assert_eq!(bytes, encode(&key).unwrap());

        let back: AuthKey = decode(&bytes).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let bytes = encode(&vec![0u8; 16]).unwrap();
        assert!(decode::<AuthKey>(&bytes).is_err());
    }
}
