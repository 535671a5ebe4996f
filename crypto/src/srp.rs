//! Number theory of the SRP-6a password proof.
//!
//! The hashing layout is the server's `Ver6A` variant: a double-salted
//! SHA-256 expansion stretched with PBKDF2-HMAC-SHA512, and proof hashes
//! over 256-byte padded group elements.

use num_bigint::BigUint;
use sha2::Sha512;

use crate::hash::sha256;
use crate::{pad256, CryptoError};

const PBKDF2_ROUNDS: u32 = 100_000;

/// The password-hashing function `PH2`.
///
/// `SH(s, d) = SHA256(s || d || s)` applied around a PBKDF2 core:
/// the intermediate is `SH(salt1, SHA256(password || salt1))`, stretched
/// with `salt2` for 100k rounds of HMAC-SHA512, and the 64-byte output is
/// wrapped once more with `salt2`.
pub fn ph2(password: &[u8], salt1: &[u8], salt2: &[u8]) -> [u8; 32] {
    let inner = sha256(&[password, salt1]);
    let stretched_input = sha256(&[salt1, &inner, salt1]);

    let mut stretched = [0; 64];
    pbkdf2::pbkdf2_hmac::<Sha512>(&stretched_input, salt2, PBKDF2_ROUNDS, &mut stretched);

    sha256(&[salt2, &stretched, salt2])
}

/// The SRP multiplier `k = SHA256(pad(p) || pad(g))`.
pub fn k(p: &BigUint, g: &BigUint) -> Result<[u8; 32], CryptoError> {
    Ok(sha256(&[&pad256(p)?, &pad256(g)?]))
}

/// The scrambling parameter `u = SHA256(pad(A) || pad(B))`.
pub fn u(a: &BigUint, b: &BigUint) -> Result<[u8; 32], CryptoError> {
    Ok(sha256(&[&pad256(a)?, &pad256(b)?]))
}

/// The client proof
/// `M1 = SHA256(SHA256(p) ^ SHA256(g) || SHA256(s1) || SHA256(s2) ||
/// pad(A) || pad(B) || pad(S))`.
///
/// The group hashes cover the minimal big-endian encodings; padding applies
/// only to the ephemeral values and the shared secret.
pub fn m1(
    p: &BigUint,
    g: &BigUint,
    salt1: &[u8],
    salt2: &[u8],
    a: &BigUint,
    b: &BigUint,
    s: &BigUint,
) -> Result<[u8; 32], CryptoError> {
    let hash_p = sha256(&[&p.to_bytes_be()]);
    let hash_g = sha256(&[&g.to_bytes_be()]);

    let mut group = [0; 32];
    for i in 0..32 {
        group[i] = hash_p[i] ^ hash_g[i];
    }

    Ok(sha256(&[
        &group,
        &sha256(&[salt1]),
        &sha256(&[salt2]),
        &pad256(a)?,
        &pad256(b)?,
        &pad256(s)?,
    ]))
}
