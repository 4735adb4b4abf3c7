//! Verifiable generation of the primes `p` and `q` (RFC 2631, section 2.2.1.1).
//!
//! A random SEED is stretched with SHA-1 into an `m`-bit candidate `q`. Once `q`
//! is prime, the same SEED (offset by a counter) is stretched into `L`-bit
//! candidates `X`, each rounded down to `p = X - (X mod 2q) + 1` so that
//! `q | p - 1`. Because every candidate is a pure function of SEED and the
//! counter, anyone holding `(seed, counter)` can recompute `p` and `q`.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::config::{GenerationConfig, DH_MIN_Q_BITS, HASH_OUTPUT_BITS};
use crate::error::{DhParamsError, Result};
use crate::utils::{
    hash_int, is_probably_prime_with, low_bits, pow2, random_bits, EntropySource, OsEntropy,
};

/// A verifiably generated prime pair together with the values needed to
/// re-derive it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimePair {
    pub p: BigUint,
    pub q: BigUint,
    pub seed: BigUint,
    /// Index of the p candidate that was accepted for `seed`.
    pub counter: usize,
}

/// Generate `(p, q)` with `q` of `m` bits and `p` of `l` bits, using the OS
/// entropy source and default bounds.
pub fn generate_prime_pair(m: usize, l: usize) -> Result<PrimePair> {
    generate_prime_pair_with(&mut OsEntropy, m, l, &GenerationConfig::default())
}

/// Generate `(p, q)` drawing seeds and Miller-Rabin bases from `source`.
///
/// Each seed yields one `q` candidate. A composite `q`, or a `q` whose counter
/// range holds no prime `p`, moves on to a fresh seed. After
/// `config.max_seed_attempts` seeds the search reports
/// [`DhParamsError::GenerationExhausted`].
pub fn generate_prime_pair_with<S: EntropySource + ?Sized>(
    source: &mut S,
    m: usize,
    l: usize,
    config: &GenerationConfig,
) -> Result<PrimePair> {
    validate_sizes(m, l)?;

    let seed_len = (m + 7) / 8;
    for attempt in 1..=config.max_seed_attempts {
        let seed = draw_seed(source, seed_len, config.seed_draw_retries)?;

        let q = derive_q(&seed, m);
        if !is_probably_prime_with(source, &q, config.primality_rounds)? {
            tracing::trace!(attempt, "q candidate composite");
            continue;
        }
        tracing::debug!(attempt, q_bits = q.bits(), "found prime q");

        match search_p(source, &seed, &q, m, l, config)? {
            Some((p, counter)) => {
                tracing::debug!(attempt, counter, p_bits = p.bits(), "found prime p");
                return Ok(PrimePair { p, q, seed, counter });
            }
            None => {
                tracing::debug!(attempt, "counter range exhausted, reselecting seed");
            }
        }
    }

    tracing::warn!(
        m,
        l,
        seed_attempts = config.max_seed_attempts,
        "prime pair generation exhausted"
    );
    Err(DhParamsError::GenerationExhausted {
        seed_attempts: config.max_seed_attempts,
    })
}

/// Run the deterministic part of the construction for one fixed `seed`.
///
/// Miller-Rabin bases are drawn from the OS; use [`prime_pair_from_seed_with`]
/// to supply them.
pub fn prime_pair_from_seed(
    seed: &BigUint,
    m: usize,
    l: usize,
    config: &GenerationConfig,
) -> Result<PrimePair> {
    prime_pair_from_seed_with(&mut OsEntropy, seed, m, l, config)
}

/// Run the deterministic part of the construction for one fixed `seed`,
/// drawing Miller-Rabin bases from `source`.
///
/// Fails with [`DhParamsError::GenerationExhausted`] when the seed's `q` is
/// composite or no `p` is found within the counter bound.
pub fn prime_pair_from_seed_with<S: EntropySource + ?Sized>(
    source: &mut S,
    seed: &BigUint,
    m: usize,
    l: usize,
    config: &GenerationConfig,
) -> Result<PrimePair> {
    validate_sizes(m, l)?;

    let exhausted = DhParamsError::GenerationExhausted { seed_attempts: 1 };

    let q = derive_q(seed, m);
    if !is_probably_prime_with(source, &q, config.primality_rounds)? {
        return Err(exhausted);
    }

    match search_p(source, seed, &q, m, l, config)? {
        Some((p, counter)) => Ok(PrimePair {
            p,
            q,
            seed: seed.clone(),
            counter,
        }),
        None => Err(exhausted),
    }
}

/// Derive the `m`-bit candidate `q` for `seed`.
///
/// `U = sum_{i < m'} (SHA1(SEED + i) XOR SHA1(SEED + m' + i)) * 2^(160 i)`,
/// reduced mod `2^m` with the top and bottom bits forced on.
pub fn derive_q(seed: &BigUint, m: usize) -> BigUint {
    let m_prime = m / HASH_OUTPUT_BITS + 1;

    let mut u = BigUint::zero();
    for i in 0..m_prime {
        let t = seed + i;
        let part = hash_int(&t) ^ hash_int(&(&t + m_prime));
        u += part << (HASH_OUTPUT_BITS * i);
    }

    let mut q = low_bits(&u, m);
    q.set_bit(0, true);
    q.set_bit((m - 1) as u64, true);
    q
}

/// Derive the `l`-bit candidate `p` for `seed` at `counter`.
///
/// The result always satisfies `p ≡ 1 (mod 2q)`; it is not guaranteed to be
/// prime or to reach `2^(l-1)`.
pub fn derive_p_candidate(
    seed: &BigUint,
    q: &BigUint,
    m: usize,
    l: usize,
    counter: usize,
) -> BigUint {
    let m_prime = m / HASH_OUTPUT_BITS + 1;
    let l_prime = l / HASH_OUTPUT_BITS + 1;

    let r = seed + 2 * m_prime + l_prime * counter;

    let mut v = BigUint::zero();
    for i in 0..l_prime {
        v += hash_int(&(&r + i)) << (HASH_OUTPUT_BITS * i);
    }

    let mut x = low_bits(&v, l);
    x.set_bit((l - 1) as u64, true);

    let two_q: BigUint = q << 1usize;
    let rem = &x % &two_q;
    x - rem + 1u32
}

fn search_p<S: EntropySource + ?Sized>(
    source: &mut S,
    seed: &BigUint,
    q: &BigUint,
    m: usize,
    l: usize,
    config: &GenerationConfig,
) -> Result<Option<(BigUint, usize)>> {
    let limit = config.counter_limit_for(l);
    let floor = pow2(l - 1);

    for counter in 0..limit {
        let p = derive_p_candidate(seed, q, m, l, counter);
        if p >= floor && is_probably_prime_with(source, &p, config.primality_rounds)? {
            return Ok(Some((p, counter)));
        }
        tracing::trace!(counter, "p candidate rejected");
    }

    Ok(None)
}

fn draw_seed<S: EntropySource + ?Sized>(
    source: &mut S,
    len: usize,
    retries: usize,
) -> Result<BigUint> {
    let mut failures = 0;
    loop {
        match random_bits(source, len) {
            Ok(seed) => return Ok(seed),
            Err(DhParamsError::RandomSourceUnavailable) if failures < retries => {
                failures += 1;
                tracing::warn!(failures, retries, "seed draw failed, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}

fn validate_sizes(m: usize, l: usize) -> Result<()> {
    if m < DH_MIN_Q_BITS {
        return Err(DhParamsError::InvalidParameters(format!(
            "q must have at least {} bits (m={})",
            DH_MIN_Q_BITS, m
        )));
    }
    if l < m {
        return Err(DhParamsError::InvalidParameters(format!(
            "p must be at least as long as q (l={}, m={})",
            l, m
        )));
    }
    Ok(())
}
