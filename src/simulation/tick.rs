//! Tick orchestrator - advances the world one deterministic step
//!
//! Each tick runs the supplied domain phases in fixed order, propagates
//! salient events through the ripple engine, sweeps the delayed-effect
//! queue, periodically reclassifies actors, and advances the calendar.
//! Identical seeds reproduce identical runs; nothing in here blocks,
//! suspends, or aborts a tick.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::calendar::WorldDate;
use crate::core::types::{EventId, Tick};
use crate::simulation::phases::{DomainPhase, TickContext};
use crate::simulation::{ripple, scheduler, tier};
use crate::timeline::{Event, EventDraft, Timeline};
use crate::world::WorldState;

/// Derive the per-tick RNG from (seed, tick)
///
/// Splitmix64-style bit mixing keeps neighboring ticks' streams
/// uncorrelated; deriving per tick (instead of one long-lived stream)
/// means a snapshot only has to carry the seed and tick to resume with
/// identical randomness.
fn tick_rng(seed: u64, tick: Tick) -> ChaCha8Rng {
    let mut z = seed ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    ChaCha8Rng::seed_from_u64(z ^ (z >> 31))
}

/// Top-level driver owning world state and the timeline
pub struct SimulationEngine {
    pub world: WorldState,
    pub timeline: Timeline,
}

impl SimulationEngine {
    pub fn new(world: WorldState) -> Self {
        Self {
            world,
            timeline: Timeline::new(),
        }
    }

    pub fn from_parts(world: WorldState, timeline: Timeline) -> Self {
        Self { world, timeline }
    }

    /// Advance the simulation by one tick, returning every event
    /// committed during it (primary, ripple-derived and reclassification)
    /// in generation order.
    pub fn step(&mut self, phases: &mut [Box<dyn DomainPhase>]) -> Vec<Event> {
        let absolute = self.world.calendar.current_tick();
        let date = self.world.calendar.current_date();

        let mut ctx = TickContext {
            tick: self.world.schedule_tick,
            date,
            rng: tick_rng(self.world.seed, absolute),
            due: scheduler::due_actors(&self.world, self.world.schedule_tick),
        };

        let mut committed: Vec<EventId> = Vec::new();

        // Domain phases in fixed order; each observes its predecessors'
        // mutations
        for phase in phases.iter_mut() {
            let drafts = phase.run(&mut self.world, &mut ctx);
            tracing::debug!(phase = phase.name(), drafts = drafts.len(), tick = absolute);
            for draft in drafts {
                committed.extend(self.commit_and_ripple(draft, date));
            }
        }

        // Delayed-effect sweep
        let landed = ripple::process_pending(&mut self.world, 1);
        for effect in &landed {
            tracing::debug!(
                effect = effect.id,
                target = ?effect.target,
                "delayed ripple landed"
            );
        }

        // Periodic full classifier pass, independent of per-actor
        // frequency
        if absolute % self.world.config.classifier_cadence == 0 {
            for draft in tier::classify_all(&mut self.world) {
                committed.extend(self.commit_and_ripple(draft, date));
            }
        }

        // Advance time; the scheduler-visible index wraps so the sampling
        // schedule is periodic
        self.world.calendar.advance();
        self.world.schedule_tick = (self.world.schedule_tick + 1) % scheduler::defined_period();

        committed
            .iter()
            .filter_map(|id| self.timeline.get(*id))
            .cloned()
            .collect()
    }

    /// Commit a draft, apply its effect map, and propagate it. Returns the
    /// committed event ids (the primary plus any synthesized spillover).
    fn commit_and_ripple(&mut self, draft: EventDraft, date: WorldDate) -> Vec<EventId> {
        let id = self.timeline.commit(draft, date);
        let Some(event) = self.timeline.get(id).cloned() else {
            return vec![id];
        };

        // The event's own effect map; unresolvable targets degrade to a
        // logged no-op
        for (target, deltas) in &event.effects {
            match self.world.get_actor_mut(*target) {
                Some(actor) => actor.apply_deltas(deltas),
                None => {
                    tracing::warn!(?target, event = ?id, "effect target missing; effect dropped");
                }
            }
        }

        let outcome = ripple::calculate_ripples(&event, &self.world);
        for effect in &outcome.immediate {
            match self.world.get_actor_mut(effect.target) {
                Some(actor) => actor.apply_deltas(&effect.deltas),
                None => {
                    tracing::warn!(
                        target = ?effect.target,
                        event = ?id,
                        "ripple target missing; effect dropped"
                    );
                }
            }
        }
        for effect in &outcome.delayed {
            ripple::enqueue_delayed(&mut self.world, id, effect);
        }

        let mut ids = vec![id];
        if let Some(secondary) = outcome.secondary {
            ids.push(self.timeline.commit(secondary, date));
        }
        ids
    }

    /// Absolute tick count since world load
    pub fn current_tick(&self) -> Tick {
        self.world.calendar.current_tick()
    }

    pub fn current_date(&self) -> WorldDate {
        self.world.calendar.current_date()
    }

    pub fn pending_effect_count(&self) -> usize {
        self.world.pending_effects.len()
    }

    pub fn tier_distribution(&self) -> ahash::AHashMap<crate::core::types::PowerClass, usize> {
        self.world.tier_distribution()
    }
}
