//! RNG module - bag randomizer and lookahead queue
//!
//! Each bag holds one of each of the 7 kinds. Pieces are taken out at a
//! uniformly random remaining index; a new bag opens as soon as the current
//! one empties. The queue keeps a fixed window of upcoming pieces fed from
//! the bags, so the window may span two bag generations.
//!
//! Also provides a simple LCG for deterministic testing.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, QUEUE_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed (0 is treated as 1)
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are the well-mixed ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// One bag of the 7 kinds, drawn without replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bag {
    pieces: ArrayVec<PieceKind, 7>,
}

impl Bag {
    /// A fresh bag holding every kind exactly once.
    pub fn open() -> Self {
        Self {
            pieces: PieceKind::ALL.into_iter().collect(),
        }
    }

    /// Remove and return a uniformly random remaining piece.
    pub fn take(&mut self, rng: &mut SimpleRng) -> Option<PieceKind> {
        if self.pieces.is_empty() {
            return None;
        }
        let idx = rng.next_range(self.pieces.len() as u32) as usize;
        Some(self.pieces.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, kind: PieceKind) -> bool {
        self.pieces.contains(&kind)
    }
}

/// Lookahead window of upcoming pieces.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    window: ArrayVec<PieceKind, QUEUE_LEN>,
    bag: Bag,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create a new queue with the given seed and fill its window
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            window: ArrayVec::new(),
            bag: Bag::open(),
            rng: SimpleRng::new(seed),
        };
        queue.init();
        queue
    }

    /// Open a fresh bag and refill the whole window.
    ///
    /// The RNG keeps running, so re-initialising yields a new sequence.
    pub fn init(&mut self) {
        self.bag = Bag::open();
        self.window.clear();
        while !self.window.is_full() {
            let kind = self.draw();
            self.window.push(kind);
        }
    }

    fn draw(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.take(&mut self.rng) {
                if self.bag.is_empty() {
                    self.bag = Bag::open();
                }
                return kind;
            }
            self.bag = Bag::open();
        }
    }

    /// Remove the front piece and append a newly drawn one.
    pub fn shift(&mut self) -> PieceKind {
        let next = self.draw();
        if self.window.is_empty() {
            return next;
        }
        let front = self.window.remove(0);
        self.window.push(next);
        front
    }

    /// Upcoming pieces, front first.
    pub fn peek(&self) -> &[PieceKind] {
        &self.window
    }

    pub fn front(&self) -> Option<PieceKind> {
        self.window.first().copied()
    }

    /// Pieces left in the current bag
    pub fn bag(&self) -> &Bag {
        &self.bag
    }

    /// Get the current RNG state (for restarting game with same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_bag_takes_all_seven_once() {
        let mut rng = SimpleRng::new(99);
        let mut bag = Bag::open();
        let mut drawn = Vec::new();
        while let Some(kind) = bag.take(&mut rng) {
            drawn.push(kind);
        }
        assert_eq!(drawn.len(), 7);
        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
        assert_eq!(bag.take(&mut rng), None);
    }

    #[test]
    fn test_queue_window_stays_full() {
        let mut queue = PieceQueue::new(3);
        assert_eq!(queue.peek().len(), QUEUE_LEN);
        for _ in 0..20 {
            let front = queue.front();
            assert_eq!(Some(queue.shift()), front);
            assert_eq!(queue.peek().len(), QUEUE_LEN);
        }
    }

    #[test]
    fn test_queue_shifts_whole_bags() {
        let mut queue = PieceQueue::new(42);
        for _ in 0..4 {
            let mut drawn: Vec<PieceKind> = (0..7).map(|_| queue.shift()).collect();
            drawn.sort_by_key(|k| k.index());
            assert_eq!(drawn, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceQueue::new(1234);
        let mut b = PieceQueue::new(1234);
        for _ in 0..30 {
            assert_eq!(a.shift(), b.shift());
        }
    }
}
