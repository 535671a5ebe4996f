//! PKCS#1 v1.5 encryption against a pinned public key.
//!
//! The server publishes its keys as a decimal modulus and a small exponent,
//! so the whole operation is one modular exponentiation over the padded
//! message; there is no key parsing beyond the integer conversion.

use num_bigint::BigUint;
use rand::{thread_rng, Rng};

use crate::CryptoError;

/// Encrypts `message` under `(n, e)` with PKCS#1 v1.5 type-2 padding.
///
/// The padding string is drawn from the thread RNG and never contains a
/// zero byte. The ciphertext is left-padded to the modulus width.
pub fn encrypt_pkcs1_v15(n: &str, e: u32, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let n = BigUint::parse_bytes(n.as_bytes(), 10).ok_or(CryptoError::MalformedKey)?;
    let modulus_len = ((n.bits() + 7) / 8) as usize;

    // EM = 00 || 02 || PS || 00 || M, with at least eight padding bytes.
    if message.len() + 11 > modulus_len {
        return Err(CryptoError::MessageTooLong);
    }

    let mut rng = thread_rng();
    let mut em = Vec::with_capacity(modulus_len);
    em.push(0x00);
    em.push(0x02);
    for _ in 0..modulus_len - message.len() - 3 {
        em.push(loop {
            let byte: u8 = rng.gen();
            if byte != 0 {
                break byte;
            }
        });
    }
    em.push(0x00);
    em.extend_from_slice(message);

    let c = BigUint::from_bytes_be(&em).modpow(&BigUint::from(e), &n);

    let mut out = vec![0; modulus_len];
    let c_bytes = c.to_bytes_be();
    out[modulus_len - c_bytes.len()..].copy_from_slice(&c_bytes);
    Ok(out)
}
