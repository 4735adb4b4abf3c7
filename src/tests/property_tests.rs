use num_bigint::BigUint;
use num_traits::{One, Zero};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SelectionConfig;
use crate::utils::{random_bits, RngEntropy};
use crate::{derive_p_candidate, derive_q, select_generator_with};

fn arb_seed() -> impl Strategy<Value = BigUint> {
    proptest::collection::vec(any::<u8>(), 1..=40)
        .prop_map(|bytes| BigUint::from_bytes_be(&bytes))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn q_candidate_has_exact_shape(seed in arb_seed(), m in 2usize..=512) {
        let q = derive_q(&seed, m);
        prop_assert_eq!(q.bits(), m as u64);
        prop_assert!(q.bit(0));
        prop_assert!(q.bit(m as u64 - 1));
    }

    #[test]
    fn p_candidate_is_one_mod_two_q(
        seed in arb_seed(),
        m in 2usize..=256,
        extra in 1usize..=512,
        counter in 0usize..64,
    ) {
        let l = m + extra;
        let q = derive_q(&seed, m);
        let p = derive_p_candidate(&seed, &q, m, l, counter);

        prop_assert_eq!((&p - BigUint::one()) % (&q << 1usize), BigUint::zero());
        prop_assert!(p.bits() <= l as u64);
    }

    #[test]
    fn random_bits_fit_byte_count(rng_seed in any::<u64>(), n in 0usize..=128) {
        let mut source = RngEntropy(StdRng::seed_from_u64(rng_seed));
        let r = random_bits(&mut source, n).unwrap();
        prop_assert!(r.bits() <= 8 * n as u64);
    }

    #[test]
    fn generator_lies_in_order_q_subgroup(rng_seed in any::<u64>()) {
        // p = 60 * q + 1 is prime for q = 1019.
        let q = BigUint::from(1019u32);
        let p = BigUint::from(61_141u32);
        let mut rng = StdRng::seed_from_u64(rng_seed);

        let g = select_generator_with(&p, &q, &mut rng, &SelectionConfig::default()).unwrap();
        prop_assert!(g > BigUint::one() && g < p);
        prop_assert_eq!(g.modpow(&q, &p), BigUint::one());
    }
}
