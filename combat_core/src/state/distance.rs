//! Melee/ranged engagement distance

use crate::entity::CombatEntity;
use crate::types::Target;
use glam::DVec2;

/// Distance used to compare against an attack range
///
/// Attackers whose range is at most `melee_threshold` only measure the
/// horizontal gap, so a small lane offset never blocks a melee swing.
/// Everyone else measures the full 2D distance.
pub fn engagement_distance(from: DVec2, to: DVec2, attack_range: f64, melee_threshold: f64) -> f64 {
    if attack_range <= melee_threshold {
        (to.x - from.x).abs()
    } else {
        from.distance(to)
    }
}

/// Whether `target` is within the entity's attack range
pub fn in_attack_range<E: CombatEntity + ?Sized>(
    entity: &E,
    target: &Target,
    melee_threshold: f64,
) -> bool {
    let range = entity.attack_range();
    engagement_distance(entity.position(), target.position, range, melee_threshold) <= range
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_uses_horizontal_distance() {
        let d = engagement_distance(DVec2::ZERO, DVec2::new(50.0, 500.0), 80.0, 100.0);
        assert!((d - 50.0).abs() < f64::EPSILON);
        assert!(d <= 80.0);
    }

    #[test]
    fn test_ranged_uses_full_distance() {
        let d = engagement_distance(DVec2::ZERO, DVec2::new(50.0, 500.0), 300.0, 100.0);
        assert!((d - 502.49).abs() < 0.01);
        assert!(d > 300.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let d = engagement_distance(DVec2::ZERO, DVec2::new(-30.0, 40.0), 100.0, 100.0);
        assert!((d - 30.0).abs() < f64::EPSILON);
    }
}
