//! Example visiting order across epochs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Dataset order by default; a seeded reshuffle every epoch when asked.
#[derive(Debug)]
pub struct EpochOrder {
    order: Vec<usize>,
    rng: Option<StdRng>,
}

impl EpochOrder {
    /// Visiting order over `len` examples.
    pub fn new(len: usize, shuffle_seed: Option<u64>) -> Self {
        Self {
            order: (0..len).collect(),
            rng: shuffle_seed.map(StdRng::seed_from_u64),
        }
    }

    /// Order for the next epoch.
    pub fn next_epoch(&mut self) -> &[usize] {
        if let Some(rng) = self.rng.as_mut() {
            self.order.shuffle(rng);
        }
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_order_without_seed() {
        let mut order = EpochOrder::new(4, None);
        assert_eq!(order.next_epoch(), &[0, 1, 2, 3]);
        assert_eq!(order.next_epoch(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        let mut a = EpochOrder::new(50, Some(7));
        let mut b = EpochOrder::new(50, Some(7));

        for _ in 0..3 {
            let first = a.next_epoch().to_vec();
            assert_eq!(first, b.next_epoch());

            let mut sorted = first.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..50).collect::<Vec<_>>());
        }
    }
}
