use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Owns the iteration order over manifest indices and the cursor into it.
///
/// With shuffling enabled the permutation is drawn from a seeded `StdRng`
/// held by the controller itself, and regenerated every time the cursor
/// wraps, so consecutive passes cover every index exactly once but in
/// different orders. Without shuffling the order is the identity and the
/// cursor is a plain round-robin.
pub struct ShuffleController {
    order: Vec<usize>,
    cursor: usize,
    rng: Option<StdRng>,
}

impl ShuffleController {
    pub fn sequential(len: usize) -> Self {
        ShuffleController {
            order: (0..len).collect(),
            cursor: 0,
            rng: None,
        }
    }

    pub fn shuffled(len: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut rng);
        ShuffleController {
            order,
            cursor: 0,
            rng: Some(rng),
        }
    }

    /// Manifest index at the cursor; advances, wrapping and reshuffling at
    /// the end of a pass. Must not be called when the manifest is empty.
    pub fn next_index(&mut self) -> usize {
        let index = self.order[self.cursor];
        self.cursor += 1;
        if self.cursor == self.order.len() {
            self.cursor = 0;
            if let Some(rng) = self.rng.as_mut() {
                self.order.shuffle(rng);
            }
        }
        index
    }
}
