use serde_derive::{Deserialize, Serialize};

/// Parameters of the `Ver6A` SRP variant: the two password salts, the group
/// generator and the big-endian group prime.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PasswordAlgorithmVer6A {
    pub salt1: Vec<u8>,
    pub salt2: Vec<u8>,
    pub g: u32,
    pub p: Vec<u8>,
}

/// The server's description of the pending password check: the SRP session
/// id, the server ephemeral `B`, the client ephemeral seed `a` and the
/// serialized algorithm parameters.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct AccountPassword {
    pub srp_id: i64,
    pub srp_b: Vec<u8>,
    pub random_data: Vec<u8>,
    pub algorithm: i64,
    pub algorithm_data: Vec<u8>,
}

/// The client's answer: session id, padded ephemeral `A` and the proof `M1`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct InputPassword {
    pub srp_id: i64,
    pub a: Vec<u8>,
    pub m1: Vec<u8>,
}
