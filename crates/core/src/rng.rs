//! RNG module - seeded piece selection
//!
//! Pieces are drawn independently and uniformly from the seven kinds.
//! A small LCG keeps games reproducible from a seed, which the tests rely on.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Pick one of the seven piece kinds uniformly.
    pub fn next_piece_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

impl Default for SimpleRng {
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

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_eq!(rng.state, 1);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..10_000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_piece_kinds_are_roughly_uniform() {
        let mut rng = SimpleRng::new(2024);
        let mut counts = [0u32; 8];
        let draws = 70_000;

        for _ in 0..draws {
            let id = rng.next_piece_kind().id();
            assert!((1..=7).contains(&id), "piece id {} out of range", id);
            counts[id as usize] += 1;
        }

        assert_eq!(counts[0], 0);
        // Each kind should land within 10% of the expected 10_000 draws.
        for (id, &count) in counts.iter().enumerate().skip(1) {
            assert!(
                (9_000..=11_000).contains(&count),
                "kind {} drawn {} times",
                id,
                count
            );
        }
    }
}
