use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::tetris::consts::NUM_SHAPES;

/// A source of upcoming shapes. `peek` must be non-destructive: repeated
/// `peek(k)` calls with no intervening `pop` return the same shape.
pub trait PieceStream {
    fn pop(&mut self) -> usize;
    fn peek(&mut self, k: usize) -> usize;
}

/// A 7-bag randomizer: each bag is a uniformly shuffled permutation of all 7
/// shape ids, refilled whenever the current bag is exhausted, so every shape
/// appears exactly once per 7 draws and peeking never starves.
pub struct BagStream {
    rng: StdRng,
    queue: Vec<usize>,
}

impl BagStream {
    /// Builds a stream seeded for reproducible play (used by the CLI's `-s` flag).
    pub fn new(seed: u64) -> BagStream {
        let mut stream = BagStream { rng: StdRng::seed_from_u64(seed), queue: Vec::new() };
        stream.refill();
        stream
    }

    fn refill(&mut self) {
        let mut bag: Vec<usize> = (0..NUM_SHAPES).collect();
        bag.shuffle(&mut self.rng);
        self.queue.extend(bag);
    }

    fn ensure_len(&mut self, len: usize) {
        while self.queue.len() < len {
            self.refill();
        }
    }
}

impl PieceStream for BagStream {
    fn pop(&mut self) -> usize {
        self.ensure_len(1);
        self.queue.remove(0)
    }

    fn peek(&mut self, k: usize) -> usize {
        self.ensure_len(k + 1);
        self.queue[k]
    }
}
