use num_bigint::BigUint;
use rand::RngCore;

use crate::config::{GenerationConfig, SelectionConfig};
use crate::error::Result;
use crate::generator::{select_generator, select_generator_with};
use crate::prime_pair::{generate_prime_pair, generate_prime_pair_with, PrimePair};
use crate::utils::EntropySource;

/// Diffie-Hellman domain parameters `(p, q, g)` plus the seed and counter
/// that reproduce `p` and `q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
    pub seed: BigUint,
    pub counter: usize,
}

impl DomainParameters {
    fn from_pair(pair: PrimePair, g: BigUint) -> Self {
        Self {
            p: pair.p,
            q: pair.q,
            g,
            seed: pair.seed,
            counter: pair.counter,
        }
    }
}

/// Generate a full parameter set with OS randomness and default bounds.
pub fn generate_domain_parameters(m: usize, l: usize) -> Result<DomainParameters> {
    let pair = generate_prime_pair(m, l)?;
    let g = select_generator(&pair.p, &pair.q)?;
    Ok(DomainParameters::from_pair(pair, g))
}

pub fn generate_domain_parameters_with<S, R>(
    source: &mut S,
    rng: &mut R,
    m: usize,
    l: usize,
    generation: &GenerationConfig,
    selection: &SelectionConfig,
) -> Result<DomainParameters>
where
    S: EntropySource + ?Sized,
    R: RngCore + ?Sized,
{
    let pair = generate_prime_pair_with(source, m, l, generation)?;
    let g = select_generator_with(&pair.p, &pair.q, rng, selection)?;
    Ok(DomainParameters::from_pair(pair, g))
}
