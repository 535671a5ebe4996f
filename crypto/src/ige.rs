//! AES-256 in infinite garble extension mode.
//!
//! IGE chains both the previous ciphertext and the previous plaintext block
//! into every encryption, so a single flipped bit garbles everything that
//! follows. The 32-byte IV seeds the two chained registers.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes256;

use crate::CryptoError;

const BLOCK: usize = 16;

/// Encrypts a block-aligned buffer: `c[i] = E(p[i] ^ c[i-1]) ^ p[i-1]`.
pub fn encrypt(plain: &[u8], key: &[u8; 32], iv: &[u8; 32]) -> Result<Vec<u8>, CryptoError> {
    if plain.len() % BLOCK != 0 {
        return Err(CryptoError::UnalignedBuffer);
    }

    let cipher = Aes256::new(GenericArray::from_slice(key));

    let mut c_prev = [0; BLOCK];
    let mut p_prev = [0; BLOCK];
    c_prev.copy_from_slice(&iv[..BLOCK]);
    p_prev.copy_from_slice(&iv[BLOCK..]);

    let mut out = Vec::with_capacity(plain.len());
    for chunk in plain.chunks(BLOCK) {
        let mut block = [0; BLOCK];
        for i in 0..BLOCK {
            block[i] = chunk[i] ^ c_prev[i];
        }

        let mut encrypted = GenericArray::clone_from_slice(&block);
        cipher.encrypt_block(&mut encrypted);

        for i in 0..BLOCK {
            c_prev[i] = encrypted[i] ^ p_prev[i];
        }
        out.extend_from_slice(&c_prev);
        p_prev.copy_from_slice(chunk);
    }

    Ok(out)
}

/// Decrypts a block-aligned buffer: `p[i] = D(c[i] ^ p[i-1]) ^ c[i-1]`.
pub fn decrypt(cipher_text: &[u8], key: &[u8; 32], iv: &[u8; 32]) -> Result<Vec<u8>, CryptoError> {
    if cipher_text.len() % BLOCK != 0 {
        return Err(CryptoError::UnalignedBuffer);
    }

    let cipher = Aes256::new(GenericArray::from_slice(key));

    let mut c_prev = [0; BLOCK];
    let mut p_prev = [0; BLOCK];
    c_prev.copy_from_slice(&iv[..BLOCK]);
    p_prev.copy_from_slice(&iv[BLOCK..]);

    let mut out = Vec::with_capacity(cipher_text.len());
    for chunk in cipher_text.chunks(BLOCK) {
        let mut block = [0; BLOCK];
        for i in 0..BLOCK {
            block[i] = chunk[i] ^ p_prev[i];
        }

        let mut decrypted = GenericArray::clone_from_slice(&block);
        cipher.decrypt_block(&mut decrypted);

        for i in 0..BLOCK {
            p_prev[i] = decrypted[i] ^ c_prev[i];
        }
        out.extend_from_slice(&p_prev);
        c_prev.copy_from_slice(chunk);
    }

    Ok(out)
}
