//! SRP-6a password proofs for second-factor authentication.

use num_bigint::BigUint;

use crate::error::Error;
use wire::constructors;

/// Computes the password verifier `v = g^PH2(password, s1, s2) mod p` for
/// the given algorithm, as big-endian bytes.
///
/// Only `Ver6A` is known; any other algorithm tag is refused.
pub fn gen_srp_hash(password: &[u8], algorithm: i64, algorithm_data: &[u8]) -> Result<Vec<u8>, Error> {
    match algorithm {
        constructors::PASSWORD_ALGORITHM_VER6A => {
            let algo: wire::PasswordAlgorithmVer6A = wire::decode(algorithm_data)?;

            let p = BigUint::from_bytes_be(&algo.p);
            let g = BigUint::from(algo.g);
            let x = BigUint::from_bytes_be(&crypto::srp::ph2(password, &algo.salt1, &algo.salt2));

            Ok(g.modpow(&x, &p).to_bytes_be())
        }
        _ => Err(Error::InvalidConstructor),
    }
}

/// Answers the server's password challenge with a serialized
/// `InputPassword` carrying the padded ephemeral `A` and the proof `M1`.
pub fn gen_input_password(password: &[u8], account_password: &[u8]) -> Result<Vec<u8>, Error> {
    let account: wire::AccountPassword = wire::decode(account_password)?;
    let algo: wire::PasswordAlgorithmVer6A = wire::decode(&account.algorithm_data)?;

    let p = BigUint::from_bytes_be(&algo.p);
    let g = BigUint::from(algo.g);
    let k = BigUint::from_bytes_be(&crypto::srp::k(&p, &g)?);

    let x = BigUint::from_bytes_be(&crypto::srp::ph2(password, &algo.salt1, &algo.salt2));
    let v = g.modpow(&x, &p);

    let a = BigUint::from_bytes_be(&account.random_data);
    let g_a = g.modpow(&a, &p);
    let g_b = BigUint::from_bytes_be(&account.srp_b);
    let u = BigUint::from_bytes_be(&crypto::srp::u(&g_a, &g_b)?);

    // t = (B - k*v) mod p, kept non-negative the modular way.
    let kv = (&k * &v) % &p;
    let t = if g_b >= kv {
        (&g_b - &kv) % &p
    } else {
        (&p + &g_b - &kv) % &p
    };

    let s = t.modpow(&(&a + &u * &x), &p);
    let m1 = crypto::srp::m1(&p, &g, &algo.salt1, &algo.salt2, &g_a, &g_b, &s)?;

    let input = wire::InputPassword {
        srp_id: account.srp_id,
        a: crypto::pad256(&g_a)?.to_vec(),
        m1: m1.to_vec(),
    };
    wire::encode(&input).map_err(Error::from)
}
