use getrandom::getrandom;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::RngCore;
use sha1::{Digest, Sha1};

use crate::error::{DhParamsError, Result};

/// Small primes used to reject candidates before Miller-Rabin.
const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// A source of random bytes that may fail.
pub trait EntropySource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// Operating system CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        getrandom(buf).map_err(|err| {
            tracing::warn!(error = %err, len = buf.len(), "os entropy source failed");
            DhParamsError::RandomSourceUnavailable
        })
    }
}

/// Adapts any infallible `RngCore` into an [`EntropySource`].
///
/// Useful for reproducible runs: wrap a seeded generator and every seed and
/// Miller-Rabin base drawn by the prime search becomes deterministic.
#[derive(Clone, Debug)]
pub struct RngEntropy<R>(pub R);

impl<R: RngCore> EntropySource for RngEntropy<R> {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.0.fill_bytes(buf);
        Ok(())
    }
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).fill(buf)
    }
}

/// Draw `n` random bytes and read them as an unsigned big-endian integer.
pub fn random_bits<S: EntropySource + ?Sized>(source: &mut S, n: usize) -> Result<BigUint> {
    let mut buf = vec![0u8; n];
    source.fill(&mut buf)?;
    Ok(BigUint::from_bytes_be(&buf))
}

/// Rejection-sample uniformly in `[0, upper)`.
pub fn random_below<S: EntropySource + ?Sized>(
    source: &mut S,
    upper: &BigUint,
) -> Result<BigUint> {
    if upper.is_zero() {
        return Ok(BigUint::zero());
    }

    let bits = upper.bits() as usize;
    let bytes_len = (bits + 7) / 8;
    let top_bits = bits % 8;

    loop {
        let mut buf = vec![0u8; bytes_len];
        source.fill(&mut buf)?;

        if top_bits != 0 {
            let mask = (1u8 << top_bits) - 1;
            buf[0] &= mask;
        }

        let n = BigUint::from_bytes_be(&buf);
        if &n < upper {
            return Ok(n);
        }
    }
}

/// `2^exp`.
pub fn pow2(exp: usize) -> BigUint {
    BigUint::one() << exp
}

/// Keep the low `bits` bits of `n` (i.e. `n mod 2^bits`).
pub fn low_bits(n: &BigUint, bits: usize) -> BigUint {
    n & (pow2(bits) - BigUint::one())
}

/// SHA-1 of the minimal big-endian encoding of `n`, read back as an integer.
///
/// Zero encodes as the empty string.
pub fn hash_int(n: &BigUint) -> BigUint {
    let bytes = if n.is_zero() {
        Vec::new()
    } else {
        n.to_bytes_be()
    };
    BigUint::from_bytes_be(&Sha1::digest(&bytes))
}

/// Miller-Rabin with `rounds` random bases drawn from the OS.
pub fn is_probably_prime(n: &BigUint, rounds: usize) -> Result<bool> {
    is_probably_prime_with(&mut OsEntropy, n, rounds)
}

/// Miller-Rabin with `rounds` random bases drawn from `source`.
pub fn is_probably_prime_with<S: EntropySource + ?Sized>(
    source: &mut S,
    n: &BigUint,
    rounds: usize,
) -> Result<bool> {
    let one = BigUint::one();
    let two = &one + &one;
    let three = &two + &one;

    if n < &two {
        return Ok(false);
    }
    if n == &two || n == &three {
        return Ok(true);
    }
    if !n.bit(0) {
        return Ok(false);
    }

    for p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if n == &p {
            return Ok(true);
        }
        if (n % &p).is_zero() {
            return Ok(false);
        }
    }

    // n - 1 = d * 2^s with d odd.
    let n_minus_1 = n - &one;
    let s = n_minus_1.trailing_zeros().unwrap_or(0);
    let d = &n_minus_1 >> s;

    for _ in 0..rounds {
        let a = random_below(source, &(n - &three))? + &two; // a ∈ [2, n-2]
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_1 {
            continue;
        }

        let mut passed = false;
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                passed = true;
                break;
            }
            if x == one {
                return Ok(false);
            }
        }

        if !passed {
            return Ok(false);
        }
    }

    Ok(true)
}
