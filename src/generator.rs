//! Selection of a generator `g` of the order-`q` subgroup (RFC 2631, section 2.2.1.2).

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::config::SelectionConfig;
use crate::error::{DhParamsError, Result};
use crate::utils::{random_below, RngEntropy};

/// Select `g` for `(p, q)` with a generator freshly seeded from the OS.
///
/// `g` is public, so a fast non-cryptographic generator is sufficient; it is
/// still seeded per call so concurrent callers never share state.
pub fn select_generator(p: &BigUint, q: &BigUint) -> Result<BigUint> {
    let mut rng = SmallRng::try_from_os_rng().map_err(|err| {
        tracing::warn!(error = %err, "failed to seed generator rng");
        DhParamsError::RandomSourceUnavailable
    })?;
    select_generator_with(p, q, &mut rng, &SelectionConfig::default())
}

/// Select `g` for `(p, q)` drawing bases from `rng`.
///
/// Computes `j = (p - 1) / q` and returns the first `h^j mod p != 1` for a
/// random `h` in `[1, p - 1)`. The pair is trusted to satisfy `q | p - 1`; a
/// pair for which no such `h` exists runs out of draws and reports
/// [`DhParamsError::SelectionExhausted`].
pub fn select_generator_with<R: RngCore + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    rng: &mut R,
    config: &SelectionConfig,
) -> Result<BigUint> {
    let one = BigUint::one();
    if p <= &one {
        return Err(DhParamsError::InvalidParameters(
            "p must be at least 2".to_string(),
        ));
    }
    if q.is_zero() {
        return Err(DhParamsError::InvalidParameters(
            "q must be non-zero".to_string(),
        ));
    }

    let p_minus_1 = p - &one;
    let j = &p_minus_1 / q;
    let mut source = RngEntropy(rng);

    for draw in 1..=config.max_draws {
        let h = random_below(&mut source, &p_minus_1)?;
        if h.is_zero() {
            continue;
        }

        let g = h.modpow(&j, p);
        if g != one {
            tracing::debug!(draws = draw, g_bits = g.bits(), "selected generator");
            return Ok(g);
        }
    }

    tracing::warn!(draws = config.max_draws, "generator selection exhausted");
    Err(DhParamsError::SelectionExhausted {
        draws: config.max_draws,
    })
}
