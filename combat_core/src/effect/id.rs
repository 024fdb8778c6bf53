//! Effect id generation strategies

use crate::types::{EffectId, EffectType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces ids for new effect instances
///
/// Every call must return an id not previously handed out by the same
/// generator. Fixed-id kinds (see [`super::SLOW_EFFECT_ID`]) bypass this.
pub trait EffectIdGenerator {
    fn next_id(&mut self, effect_type: EffectType) -> EffectId;
}

/// Deterministic counter: `move_speed-1`, `attack_damage-2`, ...
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EffectIdGenerator for SequentialIds {
    fn next_id(&mut self, effect_type: EffectType) -> EffectId {
        self.counter += 1;
        EffectId(format!("{}-{}", effect_type.key(), self.counter))
    }
}

/// Random 64-bit suffix with a counter guard against collisions
#[derive(Debug, Clone)]
pub struct RandomIds<R: Rng = StdRng> {
    rng: R,
    counter: u64,
}

impl RandomIds<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomIds::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RandomIds::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomIds<R> {
    pub fn new(rng: R) -> Self {
        RandomIds { rng, counter: 0 }
    }
}

impl<R: Rng> EffectIdGenerator for RandomIds<R> {
    fn next_id(&mut self, effect_type: EffectType) -> EffectId {
        self.counter += 1;
        let salt: u64 = self.rng.gen();
        EffectId(format!("{}-{}-{:016x}", effect_type.key(), self.counter, salt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(EffectType::MoveSpeed).as_str(), "move_speed-1");
        assert_eq!(ids.next_id(EffectType::AttackDamage).as_str(), "attack_damage-2");
    }

    #[test]
    fn test_random_ids_unique() {
        let mut ids = RandomIds::seeded(7);
        let seen: HashSet<_> = (0..500).map(|_| ids.next_id(EffectType::AttackSpeed)).collect();
        assert_eq!(seen.len(), 500);
    }

    #[test]
    fn test_random_ids_reproducible() {
        let mut a = RandomIds::seeded(42);
        let mut b = RandomIds::seeded(42);
        assert_eq!(a.next_id(EffectType::HealOverTime), b.next_id(EffectType::HealOverTime));
    }
}
