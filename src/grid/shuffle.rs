use rand::Rng;

/// Returns a uniformly shuffled copy of `items`.
pub fn shuffled<T: Clone>(items: &[T]) -> Vec<T> {
    shuffled_with(items, &mut rand::thread_rng())
}

/// Fisher–Yates over a copy: walk i from the last index down to 1 and swap
/// with a uniform pick from 0..=i. The input is never mutated and every
/// permutation is equally likely.
pub fn shuffled_with<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.gen_range(0..=i);
        out.swap(i, j);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn output_is_a_permutation_and_input_is_untouched() {
        let original: Vec<u32> = (0..100).collect();
        let out = shuffled(&original);

        assert_eq!(out.len(), original.len());
        let mut sorted = out.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, original);

        // the source ordering must survive the call
        assert_eq!(original, (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn degenerate_inputs() {
        assert!(shuffled::<u32>(&[]).is_empty());
        assert_eq!(shuffled(&[7]), vec![7]);
    }

    #[test]
    fn positions_are_statistically_uniform() {
        const N: usize = 4;
        const TRIALS: usize = 8000;
        let items: Vec<usize> = (0..N).collect();
        let mut rng = StdRng::seed_from_u64(0xA77E);

        // counts[v][p]: how often value v landed on position p
        let mut counts = [[0usize; N]; N];
        for _ in 0..TRIALS {
            let out = shuffled_with(&items, &mut rng);
            for (pos, &value) in out.iter().enumerate() {
                counts[value][pos] += 1;
            }
        }

        // expected TRIALS / N per cell; the bound is ~6.5 sigma
        let expected = TRIALS / N;
        for row in &counts {
            for &cell in row {
                assert!(
                    cell.abs_diff(expected) < 250,
                    "biased cell: {cell} vs expected {expected}"
                );
            }
        }
    }
}
