//! Sealing of encrypted frame payloads.
//!
//! The message key doubles as the payload's integrity check and as the seed
//! of the AES key schedule: both sides derive the cipher key and IV from
//! fixed fragments of the auth key mixed with fragments of the message key,
//! so the frame carries no other keying material.

use rand::{thread_rng, Rng};

use crate::hash::sha256;
use crate::{ige, CryptoError, KEY_SIZE};

const BLOCK: usize = 16;

/// 32-byte message key binding a payload to an auth key.
pub fn message_key(auth_key: &[u8; KEY_SIZE], payload: &[u8]) -> [u8; 32] {
    sha256(&[&auth_key[88..120], payload])
}

fn derive_key_iv(auth_key: &[u8; KEY_SIZE], message_key: &[u8; 32]) -> ([u8; 32], [u8; 32]) {
    let a = sha256(&[&message_key[..16], &auth_key[..36]]);
    let b = sha256(&[&auth_key[40..76], &message_key[16..]]);

    let mut key = [0; 32];
    key[..8].copy_from_slice(&a[..8]);
    key[8..24].copy_from_slice(&b[8..24]);
    key[24..].copy_from_slice(&a[24..]);

    let mut iv = [0; 32];
    iv[..8].copy_from_slice(&b[..8]);
    iv[8..24].copy_from_slice(&a[8..24]);
    iv[24..].copy_from_slice(&b[24..]);

    (key, iv)
}

/// Pads the payload to the cipher block, derives its message key and
/// encrypts it under the auth key.
pub fn seal(
    auth_key: &[u8; KEY_SIZE],
    payload: &[u8],
) -> Result<([u8; 32], Vec<u8>), CryptoError> {
    let mut padded = payload.to_vec();
    let shortfall = (BLOCK - padded.len() % BLOCK) % BLOCK;
    if shortfall > 0 {
        let mut pad = vec![0; shortfall];
        thread_rng().fill(&mut pad[..]);
        padded.extend_from_slice(&pad);
    }

    let message_key = self::message_key(auth_key, &padded);
    let (key, iv) = derive_key_iv(auth_key, &message_key);

    let sealed = ige::encrypt(&padded, &key, &iv)?;
    Ok((message_key, sealed))
}

/// Reverses [`seal`]: decrypts the payload and verifies it against the
/// message key carried on the frame.
///
/// The returned plaintext still carries the block padding; the codec's
/// length prefixes make it invisible to deserialization.
pub fn open(
    auth_key: &[u8; KEY_SIZE],
    message_key: &[u8],
    payload: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if message_key.len() != 32 {
        return Err(CryptoError::MessageKeyMismatch);
    }
    let mut expected = [0; 32];
    expected.copy_from_slice(message_key);

    let (key, iv) = derive_key_iv(auth_key, &expected);
    let plain = ige::decrypt(payload, &key, &iv)?;

    if self::message_key(auth_key, &plain) != expected {
        return Err(CryptoError::MessageKeyMismatch);
    }
    Ok(plain)
}
