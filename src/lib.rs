//! Diffie-Hellman domain parameter generation.
//!
//! Implements the verifiable `(p, q)` construction and the generator selection
//! of RFC 2631: `q` is an `m`-bit prime, `p` an `L`-bit prime with `q | p - 1`,
//! and `g` an element of order `q` modulo `p`.

pub mod config;
pub mod error;
pub mod generator;
pub mod params;
pub mod prime_pair;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::config::{GenerationConfig, SelectionConfig};
pub use crate::error::{DhParamsError, Result};
pub use crate::generator::{select_generator, select_generator_with};
pub use crate::params::{
    generate_domain_parameters, generate_domain_parameters_with, DomainParameters,
};
pub use crate::prime_pair::{
    derive_p_candidate, derive_q, generate_prime_pair, generate_prime_pair_with,
    prime_pair_from_seed, prime_pair_from_seed_with, PrimePair,
};
pub use crate::utils::{random_bits, EntropySource, OsEntropy, RngEntropy};
