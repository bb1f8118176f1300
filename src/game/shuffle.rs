use rand::Rng;

/// Returns a uniformly shuffled copy of `items` (Fisher-Yates, back to front).
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    for i in (1..=copy.len()).rev() {
        let r = rng.random_range(0..i);
        copy.swap(i - 1, r);
    }
    copy
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn empty_and_single_are_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffled::<u8, _>(&[], &mut rng).is_empty());
        assert_eq!(shuffled(&[42], &mut rng), vec![42]);
    }

    #[test]
    fn every_order_of_three_shows_up() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            seen.insert(shuffled(&[1, 2, 3], &mut rng));
        }
        assert_eq!(seen.len(), 6);
    }

    proptest! {
        #[test]
        fn output_is_a_permutation(items in prop::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
            let original = items.clone();
            let mut rng = StdRng::seed_from_u64(seed);
            let out = shuffled(&items, &mut rng);

            prop_assert_eq!(&items, &original);
            prop_assert_eq!(out.len(), items.len());

            let mut sorted_out = out.clone();
            sorted_out.sort_unstable();
            let mut sorted_in = items.clone();
            sorted_in.sort_unstable();
            prop_assert_eq!(sorted_out, sorted_in);
        }
    }
}
