use sha2::{Digest, Sha256};

/// SHA-256 over the concatenation of `parts`.
///
/// Most protocol hashes are built from several fragments; feeding them
/// through one hasher avoids assembling an intermediate buffer.
pub fn sha256(parts: &[&[u8]]) -> [u8; 32] {
    let digest = parts
        .iter()
        .fold(Sha256::new(), |mut hasher, part| {
            hasher.update(part);
            hasher
        })
        .finalize();

    let mut out = [0; 32];
    out.copy_from_slice(&digest);
    out
}

#[cfg(test)]
mod tests {
    use super::sha256;
    use hex_literal::hex;

    #[test]
    fn matches_the_reference_digest() {
        // SHA256("abc"), split across fragments.
        let expected = hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
        assert_eq!(sha256(&[b"a", b"bc"]), expected);
        assert_eq!(sha256(&[b"abc"]), expected);
    }

    #[test]
    fn empty_input_is_the_empty_digest() {
        let expected = hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
        assert_eq!(sha256(&[]), expected);
    }
}
