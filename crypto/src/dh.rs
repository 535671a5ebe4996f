//! Diffie-Hellman arithmetic over the server's pinned groups.

use num_bigint::BigUint;
use rand::{thread_rng, Rng};

use crate::{pad256, CryptoError, KEY_SIZE};

/// A multiplicative group `(p, g)` with `p` a large prime.
#[derive(Debug, Clone)]
pub struct Group {
    prime: BigUint,
    gen: BigUint,
}

/// An ephemeral keypair inside a [`Group`].
#[derive(Debug, Clone)]
pub struct KeyPair {
    private: BigUint,
    public: BigUint,
}

impl Group {
    /// Builds the group from its wire form: a hex-encoded prime and a small
    /// generator.
    pub fn from_wire(prime_hex: &str, gen: u32) -> Result<Group, CryptoError> {
        let prime =
            BigUint::parse_bytes(prime_hex.as_bytes(), 16).ok_or(CryptoError::MalformedKey)?;
        if prime < BigUint::from(5u32) || gen < 2 {
            return Err(CryptoError::MalformedKey);
        }

        Ok(Group {
            prime,
            gen: BigUint::from(gen),
        })
    }

    /// Draws a private exponent uniformly from `[2, p-2]` and derives the
    /// matching public value `g^a mod p`.
    pub fn generate_keypair(&self) -> KeyPair {
        let mut seed = [0; KEY_SIZE];
        thread_rng().fill(&mut seed[..]);

        let span = &self.prime - 3u32;
        let private = BigUint::from_bytes_be(&seed) % span + 2u32;
        let public = self.gen.modpow(&private, &self.prime);

        KeyPair { private, public }
    }

    /// Completes the exchange: `peer^a mod p`, left-padded to the protocol's
    /// 256-byte key width.
    ///
    /// Degenerate peer values (0, 1, or outside the group) are rejected
    /// before the exponentiation.
    pub fn shared_secret(
        &self,
        keypair: &KeyPair,
        peer_public: &[u8],
    ) -> Result<[u8; KEY_SIZE], CryptoError> {
        let peer = BigUint::from_bytes_be(peer_public);
        if peer < BigUint::from(2u32) || peer >= self.prime {
            return Err(CryptoError::MalformedKey);
        }

        pad256(&peer.modpow(&keypair.private, &self.prime))
    }
}

impl KeyPair {
    /// Big-endian bytes of the public value, as transmitted on the wire.
    pub fn public_bytes(&self) -> Vec<u8> {
        self.public.to_bytes_be()
    }
}
