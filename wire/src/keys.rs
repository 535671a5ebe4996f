use serde_derive::{Deserialize, Serialize};

use crate::auth_key::AuthKey;

/// A pinned RSA public key. The modulus is a decimal string and the exponent
/// a small integer, exactly as the server publishes them.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PublicKey {
    pub fingerprint: i64,
    pub n: String,
    pub e: u32,
}

/// A pinned Diffie-Hellman group: a hex-encoded prime and a small generator.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DhGroup {
    pub fingerprint: i64,
    pub prime: String,
    pub gen: u32,
}

/// The full set of keys the server is pinned to, loaded once at startup.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ServerKeys {
    pub public_keys: Vec<PublicKey>,
    pub dh_groups: Vec<DhGroup>,
}

/// The persisted connection state. `auth_id == 0` means the connection has
/// never completed a handshake.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub auth_id: i64,
    pub auth_key: AuthKey,
    pub diff_time: i64,
}
