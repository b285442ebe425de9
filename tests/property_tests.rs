//! Property tests for the core invariants
//!
//! - the hysteresis counter is zero whenever natural and current class
//!   agree
//! - ripple strength decreases strictly with hop distance for any decay
//!   factor in (0, 1)
//! - the scheduler selects an actor exactly once per frequency window

use proptest::prelude::*;

use pax_mundi::core::config::SimulationConfig;
use pax_mundi::core::types::{ActorId, PowerClass};
use pax_mundi::simulation::scheduler;
use pax_mundi::simulation::tier::{check_reclassification, natural_class};
use pax_mundi::world::actor::Actor;

fn arbitrary_class() -> impl Strategy<Value = PowerClass> {
    prop::sample::select(PowerClass::ALL.to_vec())
}

fn arbitrary_actor() -> impl Strategy<Value = Actor> {
    (
        arbitrary_class(),
        0.0f32..=100.0,
        0.0f32..=100.0,
        0.0f32..=100.0,
        0.0f32..=100.0,
        0.0f32..=100.0,
        any::<bool>(),
        0u32..=6,
    )
        .prop_map(
            |(class, military, economy, stability, soft_power, projection, arsenal, counter)| {
                let mut actor = Actor::new(ActorId(1), "Subject", class);
                actor.metrics.military = military;
                actor.metrics.economy = economy;
                actor.metrics.stability = stability;
                actor.metrics.soft_power = soft_power;
                actor.metrics.projection = projection;
                actor.has_strategic_arsenal = arsenal;
                actor.reclass_counter = counter;
                actor
            },
        )
}

proptest! {
    /// After any classifier pass, agreement between natural and current
    /// class implies a zero counter
    #[test]
    fn counter_is_zero_whenever_classes_agree(mut actor in arbitrary_actor()) {
        let config = SimulationConfig::default();

        for _ in 0..8 {
            if let Some(new_class) = check_reclassification(&mut actor, &config) {
                pax_mundi::simulation::tier::apply_reclassification(&mut actor, new_class);
            }
            if natural_class(&actor) == actor.class {
                prop_assert_eq!(actor.reclass_counter, 0);
            }
        }
    }

    /// A commit never leaves a stale counter behind
    #[test]
    fn reclassification_resets_counter(mut actor in arbitrary_actor()) {
        let config = SimulationConfig::default();
        if check_reclassification(&mut actor, &config).is_some() {
            prop_assert_eq!(actor.reclass_counter, 0);
        }
    }

    /// strength = decay^hop is strictly decreasing in hops for decay in
    /// (0, 1)
    #[test]
    fn ripple_strength_strictly_decreasing(
        decay in 0.01f32..=0.99,
        importance in 1u8..=5,
    ) {
        let mut last = f32::INFINITY;
        for hop in 0..4i32 {
            let strength = decay.powi(hop);
            let magnitude = importance as f32 * strength;
            prop_assert!(magnitude < last);
            last = magnitude;
        }
    }

    /// Exactly one selection per window of `frequency` consecutive ticks
    #[test]
    fn one_selection_per_frequency_window(
        frequency in 1u64..=30,
        window_start in 0u64..=10_000,
    ) {
        let hits = (window_start..window_start + frequency)
            .filter(|&tick| scheduler::is_due(frequency, tick))
            .count();
        prop_assert_eq!(hits, 1);
    }
}
