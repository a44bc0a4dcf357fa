//! Property-based checks for the simulation invariants that must hold for
//! any input: bounded energy, symmetric collision and spawn separation.

use glam::Vec2;
use pollo_loco::sim::{Body, Rect, SpawnManager, overlaps};
use pollo_loco::tuning::SpawnTuning;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..300.0, 0.0f32..300.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn body_strategy() -> impl Strategy<Value = Body> {
    (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..400.0, 1.0f32..400.0)
        .prop_map(|(x, y, w, h)| Body::new(Vec2::new(x, y), Vec2::new(w, h)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Energy never leaves 0..=100 and only ever goes down
    #[test]
    fn energy_stays_in_range(hits in prop::collection::vec(any::<u8>(), 0..40)) {
        let mut body = Body::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let mut previous = body.energy;
        for (t, damage) in hits.into_iter().enumerate() {
            let remaining = body.hit(damage, t as u64 * 40);
            prop_assert!(remaining <= 100);
            prop_assert!(remaining <= previous);
            prop_assert_eq!(remaining, previous.saturating_sub(damage));
            previous = remaining;
        }
        prop_assert_eq!(body.is_dead(), body.energy == 0);
    }

    #[test]
    fn rect_intersection_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn body_overlap_is_symmetric(a in body_strategy(), b in body_strategy()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    /// Replacement spawns stay inside the corridor and keep their distance
    /// from live enemies and from each other
    #[test]
    fn replacements_are_separated(
        seed in any::<u64>(),
        n in 0usize..8,
        character_x in -200.0f32..1500.0,
        corridor in 0.0f32..4000.0,
        existing in prop::collection::vec(0.0f32..5000.0, 0..6),
    ) {
        let tuning = SpawnTuning::default();
        let spawner = SpawnManager::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        let boss_x = character_x + corridor;

        let placed = spawner.spawn_replacements(n, character_x, boss_x, &existing, &mut rng);

        prop_assert!(placed.len() <= n);
        for (i, &x) in placed.iter().enumerate() {
            prop_assert!(x >= character_x + tuning.margin);
            prop_assert!(x <= boss_x - tuning.margin);
            prop_assert!(SpawnManager::is_separated(x, &existing, tuning.min_gap));
            prop_assert!(SpawnManager::is_separated(x, &placed[..i], tuning.min_gap));
        }
    }

    /// An empty corridor yields nothing, however many are asked for
    #[test]
    fn no_corridor_no_spawns(
        seed in any::<u64>(),
        character_x in -1000.0f32..5000.0,
        n in 1usize..8,
    ) {
        let tuning = SpawnTuning::default();
        let spawner = SpawnManager::new(&tuning);
        let mut rng = Pcg32::seed_from_u64(seed);
        let boss_x = character_x + 2.0 * tuning.margin - 1.0;
        let placed = spawner.spawn_replacements(n, character_x, boss_x, &[], &mut rng);
        prop_assert!(placed.is_empty());
    }
}
