//! Factorization of the server's 64-bit semiprime challenge.

use num_integer::Integer;

/// Splits `pq` into its two prime factors, smaller first.
///
/// Brent's cycle-finding variant of Pollard's rho. The starting point and
/// constants are fixed fractions of `pq`, so the result is deterministic
/// for a given input. The caller guarantees `pq` is a product of two
/// primes; composite cofactors would loop forever.
pub fn factorize(pq: u64) -> (u64, u64) {
    if pq % 2 == 0 {
        return (2, pq / 2);
    }

    let mul_mod = |a: u64, b: u64| ((a as u128 * b as u128) % pq as u128) as u64;
    let step = |v: u64, c: u64| ((mul_mod(v, v) as u128 + c as u128) % pq as u128) as u64;
    let abs_diff = |a: u64, b: u64| if a > b { a - b } else { b - a };

    let c = pq / 2;
    let m = pq / 4 * 3;
    let mut y = pq / 4;

    let mut g = 1;
    let mut r = 1u64;
    let mut q = 1;
    let mut x = 0;
    let mut ys = 0;

    while g == 1 {
        x = y;
        for _ in 0..r {
            y = step(y, c);
        }

        let mut k = 0;
        while k < r && g == 1 {
            ys = y;
            for _ in 0..m.min(r - k) {
                y = step(y, c);
                q = mul_mod(q, abs_diff(x, y));
            }
            g = q.gcd(&pq);
            k += m;
        }

        r *= 2;
    }

    // The batched gcd overshot a cycle; retrace it one step at a time.
    if g == pq {
        g = 1;
        while g == 1 {
            ys = step(ys, c);
            g = abs_diff(x, ys).gcd(&pq);
        }
    }

    let (p, q) = (g, pq / g);
    if p < q {
        (p, q)
    } else {
        (q, p)
    }
}

#[cfg(test)]
mod tests {
    use super::factorize;

    #[test]
    fn small_semiprimes() {
        assert_eq!(factorize(15), (3, 5));
        assert_eq!(factorize(35), (5, 7));
        assert_eq!(factorize(6), (2, 3));
    }

    #[test]
    fn full_width_semiprime() {
        assert_eq!(factorize(1_470_626_929_934_143_021), (1_206_429_347, 1_218_991_343));
    }

    #[test]
    fn factors_multiply_back() {
        let pq = 1_000_003u64 * 1_000_033;
        let (p, q) = factorize(pq);
        assert!(p < q);
        assert_eq!(p * q, pq);
    }
}
