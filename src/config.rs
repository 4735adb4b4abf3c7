//! Generation parameters and search bounds.

/// Bit width of the hash output used to stretch a seed (SHA-1).
pub const HASH_OUTPUT_BITS: usize = 160;

/// Miller-Rabin rounds; each round has error probability at most 1/4, so 50
/// rounds bound the false-positive rate by 2^-100.
pub const DH_PRIMALITY_ROUNDS: usize = 50;

/// Candidate p values tried per 1024 bits of p before a seed is abandoned.
pub const DH_COUNTER_BLOCK: usize = 4096;

/// Default number of seeds (and hence q candidates) tried before giving up.
pub const DH_MAX_SEED_ATTEMPTS: usize = 10_000;

/// Extra attempts made when the entropy source fails to deliver a seed.
pub const DH_SEED_DRAW_RETRIES: usize = 3;

/// Maximum random bases drawn while searching for a generator.
pub const DH_GENERATOR_MAX_DRAWS: usize = 4096;

/// Smallest accepted bit length for q (bit 0 and bit m-1 must be distinct).
pub const DH_MIN_Q_BITS: usize = 2;

/// Bounds and tuning for the (p, q) search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Miller-Rabin rounds applied to every q and p candidate.
    pub primality_rounds: usize,
    /// Outer budget: seeds drawn before reporting exhaustion.
    pub max_seed_attempts: usize,
    /// Inner budget override. `None` uses `4096 * (L / 1024 + 1)`.
    pub counter_limit: Option<usize>,
    /// Bounded retries of a failed seed draw before the failure propagates.
    pub seed_draw_retries: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            primality_rounds: DH_PRIMALITY_ROUNDS,
            max_seed_attempts: DH_MAX_SEED_ATTEMPTS,
            counter_limit: None,
            seed_draw_retries: DH_SEED_DRAW_RETRIES,
        }
    }
}

impl GenerationConfig {
    /// Set the Miller-Rabin round count.
    pub fn with_primality_rounds(mut self, rounds: usize) -> Self {
        self.primality_rounds = rounds;
        self
    }

    /// Set the number of seeds tried before reporting exhaustion.
    pub fn with_max_seed_attempts(mut self, attempts: usize) -> Self {
        self.max_seed_attempts = attempts;
        self
    }

    /// Override the per-seed bound on p candidates.
    pub fn with_counter_limit(mut self, limit: usize) -> Self {
        self.counter_limit = Some(limit);
        self
    }

    /// Set how many failed seed draws are retried.
    pub fn with_seed_draw_retries(mut self, retries: usize) -> Self {
        self.seed_draw_retries = retries;
        self
    }

    /// Inner search bound for a target bit length `l` of p.
    pub fn counter_limit_for(&self, l: usize) -> usize {
        self.counter_limit.unwrap_or(DH_COUNTER_BLOCK * (l / 1024 + 1))
    }
}

/// Bounds for the generator search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Random bases drawn before reporting exhaustion.
    pub max_draws: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_draws: DH_GENERATOR_MAX_DRAWS,
        }
    }
}

impl SelectionConfig {
    /// Set the cap on random bases drawn.
    pub fn with_max_draws(mut self, draws: usize) -> Self {
        self.max_draws = draws;
        self
    }
}
