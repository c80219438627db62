//! Collision-avoiding seed derivation.
//!
//! Seeds are Sha256 digests over host-supplied entropy, the token id, the
//! retry attempt, and a rolling digest of every seed issued so far. The
//! generator never consults hidden global state; determinism is fixed by
//! the entropy handed in at construction.

use relics_types::{EngineError, Result, Seed, TokenId};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Upper bound on the collision-retry loop. Exceeding it fails
/// `SeedExhausted` instead of looping unboundedly.
pub const MAX_SEED_ATTEMPTS: u32 = 64;

/// Deterministic seed source.
#[derive(Debug, Clone)]
pub struct SeedGenerator {
    entropy: [u8; 32],
    /// Rolling digest folded over every issued seed.
    chain: [u8; 32],
}

impl SeedGenerator {
    /// Generator keyed by host-supplied entropy.
    pub fn new(entropy: [u8; 32]) -> Self {
        Self {
            entropy,
            chain: [0u8; 32],
        }
    }

    fn candidate(&self, id: TokenId, attempt: u32) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.entropy);
        hasher.update(id.to_le_bytes());
        hasher.update(attempt.to_le_bytes());
        hasher.update(self.chain);
        hasher.finalize().into()
    }

    /// Draw a seed for `id` distinct from everything in `used`.
    ///
    /// On success the rolling digest advances, so later draws depend on
    /// every earlier one.
    pub fn draw(&mut self, id: TokenId, used: &HashSet<Seed>) -> Result<Seed> {
        for attempt in 0..MAX_SEED_ATTEMPTS {
            let digest = self.candidate(id, attempt);
            let seed = Seed::new(digest);
            if !used.contains(&seed) {
                self.chain = digest;
                return Ok(seed);
            }
        }
        Err(EngineError::SeedExhausted { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draws_are_distinct_across_ids() {
        let mut generator = SeedGenerator::new([7u8; 32]);
        let mut used = HashSet::new();
        for id in 1..=100u64 {
            let seed = generator.draw(id, &used).unwrap();
            assert!(used.insert(seed));
        }
        assert_eq!(used.len(), 100);
    }

    #[test]
    fn test_same_entropy_is_deterministic() {
        let used = HashSet::new();
        let mut a = SeedGenerator::new([1u8; 32]);
        let mut b = SeedGenerator::new([1u8; 32]);
        assert_eq!(a.draw(1, &used).unwrap(), b.draw(1, &used).unwrap());
        assert_eq!(a.draw(2, &used).unwrap(), b.draw(2, &used).unwrap());
    }

    #[test]
    fn test_collision_retries_then_succeeds() {
        let mut generator = SeedGenerator::new([9u8; 32]);
        // Poison the first candidate so the generator has to retry.
        let first = Seed::new(generator.candidate(1, 0));
        let used: HashSet<Seed> = [first].into_iter().collect();
        let seed = generator.draw(1, &used).unwrap();
        assert_ne!(seed, first);
    }

    #[test]
    fn test_exhaustion_after_bounded_retries() {
        let generator = SeedGenerator::new([5u8; 32]);
        let used: HashSet<Seed> = (0..MAX_SEED_ATTEMPTS)
            .map(|attempt| Seed::new(generator.candidate(1, attempt)))
            .collect();
        let mut generator = generator;
        assert!(matches!(
            generator.draw(1, &used),
            Err(EngineError::SeedExhausted { id: 1 })
        ));
    }
}
