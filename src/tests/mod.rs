use std::sync::OnceLock;

use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{DhParamsError, Result};
use crate::utils::{EntropySource, RngEntropy};

pub(crate) const TEST_M: usize = 160;
pub(crate) const TEST_L: usize = 512;

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A (p, q) pair at the smallest realistic sizing, generated once per test run.
fn test_pair() -> &'static crate::PrimePair {
    static PAIR: OnceLock<crate::PrimePair> = OnceLock::new();
    PAIR.get_or_init(|| {
        init_tracing();
        crate::generate_prime_pair(TEST_M, TEST_L).expect("generate_prime_pair failed")
    })
}

fn seeded_entropy(seed: u64) -> RngEntropy<StdRng> {
    RngEntropy(StdRng::seed_from_u64(seed))
}

/// Entropy source that fails a fixed number of times before delegating.
/// Records the length of every successful draw.
struct FlakyEntropy {
    failures_left: usize,
    calls: usize,
    draw_lens: Vec<usize>,
    inner: RngEntropy<StdRng>,
}

impl FlakyEntropy {
    fn new(failures: usize) -> Self {
        Self {
            failures_left: failures,
            calls: 0,
            draw_lens: Vec::new(),
            inner: seeded_entropy(99),
        }
    }
}

impl EntropySource for FlakyEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.calls += 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(DhParamsError::RandomSourceUnavailable);
        }
        self.draw_lens.push(buf.len());
        self.inner.fill(buf)
    }
}

/// Draw seeds from a fixed generator until one yields a prime q.
fn seed_with_prime_q(rng_seed: u64, m: usize) -> BigUint {
    let mut source = seeded_entropy(rng_seed);
    for _ in 0..10_000 {
        let seed = crate::random_bits(&mut source, (m + 7) / 8).unwrap();
        let q = crate::derive_q(&seed, m);
        if crate::utils::is_probably_prime(&q, crate::config::DH_PRIMALITY_ROUNDS).unwrap() {
            return seed;
        }
    }
    panic!("no seed with prime q found");
}



pub mod property_tests;
