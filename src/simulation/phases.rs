//! Domain phases - externally supplied per-tick systems
//!
//! The orchestrator runs phases in slice order; each phase observes the
//! state left by the phases before it in the same tick. That sequential
//! mutation is the documented model; there is no phase-level isolation.
//!
//! The reference phases here keep the demo binary and tests honest; real
//! domain systems (economy formulas, diplomatic scoring, combat) live
//! outside the core and plug in through the same trait.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::calendar::WorldDate;
use crate::core::types::{ActorId, Stat, Tick};
use crate::timeline::{EventDraft, EventKind, EventSource};
use crate::world::WorldState;

/// Per-tick context handed to every phase
pub struct TickContext {
    /// Scheduler-visible tick index (wrapped modulo the schedule period)
    pub tick: Tick,
    pub date: WorldDate,
    /// Deterministic per-tick RNG, derived from (world seed, tick)
    pub rng: ChaCha8Rng,
    /// Actors due for update this tick
    pub due: Vec<ActorId>,
}

/// A domain system run once per tick
///
/// Implementations must be total over world state: a missing actor
/// reference is skipped, never a panic.
pub trait DomainPhase {
    fn name(&self) -> &'static str;
    fn run(&mut self, world: &mut WorldState, ctx: &mut TickContext) -> Vec<EventDraft>;
}

/// Drifts stats of due actors toward their resting levels
///
/// Stability recovers toward a neutral baseline; a stable actor's economy
/// creeps upward while an unstable one's erodes.
pub struct ResourceDriftPhase;

impl DomainPhase for ResourceDriftPhase {
    fn name(&self) -> &'static str {
        "resource_drift"
    }

    fn run(&mut self, world: &mut WorldState, ctx: &mut TickContext) -> Vec<EventDraft> {
        for &id in &ctx.due {
            let Some(actor) = world.get_actor_mut(id) else {
                continue;
            };

            let stability = actor.metrics.stability;
            actor.apply_stat_delta(Stat::Stability, (50.0 - stability) * 0.01);
            let economy_drift = if stability > 40.0 { 0.1 } else { -0.15 };
            actor.apply_stat_delta(Stat::Economy, economy_drift);
        }
        Vec::new()
    }
}

/// Scheduled-actor decision stub: militarized rivalries escalate, soft
/// power opens trade
pub struct DecisionPhase;

impl DomainPhase for DecisionPhase {
    fn name(&self) -> &'static str {
        "decisions"
    }

    fn run(&mut self, world: &mut WorldState, ctx: &mut TickContext) -> Vec<EventDraft> {
        let mut drafts = Vec::new();

        for &id in &ctx.due {
            let Some(actor) = world.get_actor(id) else {
                continue;
            };

            if let Some(&rival) = actor.rivals.first() {
                if actor.metrics.military > 60.0 && ctx.rng.gen_bool(0.05) {
                    drafts.push(
                        EventDraft::new(
                            EventKind::WarDeclared,
                            EventSource::Phase(self.name().into()),
                            id,
                            5,
                        )
                        .with_targets(vec![rival])
                        .with_effect(rival, Stat::Stability, -2.0),
                    );
                    continue;
                }
            }

            if let Some(&neighbor) = actor.neighbors.first() {
                if actor.metrics.soft_power > 60.0 && ctx.rng.gen_bool(0.08) {
                    drafts.push(
                        EventDraft::new(
                            EventKind::TradeAccord,
                            EventSource::Phase(self.name().into()),
                            id,
                            2,
                        )
                        .with_targets(vec![neighbor])
                        .with_effect(neighbor, Stat::Economy, 1.0)
                        .with_effect(id, Stat::Economy, 1.0),
                    );
                }
            }
        }

        drafts
    }
}

/// Stochastic event injection: rare crises and economic shocks
pub struct IncidentPhase;

impl DomainPhase for IncidentPhase {
    fn name(&self) -> &'static str {
        "incidents"
    }

    fn run(&mut self, world: &mut WorldState, ctx: &mut TickContext) -> Vec<EventDraft> {
        let mut drafts = Vec::new();

        for &id in &ctx.due {
            let Some(actor) = world.get_actor(id) else {
                continue;
            };

            if actor.metrics.stability < 30.0 && ctx.rng.gen_bool(0.1) {
                let importance = ctx.rng.gen_range(3..=5);
                drafts.push(
                    EventDraft::new(
                        EventKind::Crisis,
                        EventSource::Phase(self.name().into()),
                        id,
                        importance,
                    )
                    .with_effect(id, Stat::Stability, -3.0),
                );
            } else if ctx.rng.gen_bool(0.02) {
                drafts.push(
                    EventDraft::new(
                        EventKind::EconomicShock,
                        EventSource::Phase(self.name().into()),
                        id,
                        ctx.rng.gen_range(2..=4),
                    )
                    .with_effect(id, Stat::Economy, -2.0),
                );
            }
        }

        drafts
    }
}

/// The reference phase stack in its fixed order
pub fn reference_phases() -> Vec<Box<dyn DomainPhase>> {
    vec![
        Box::new(ResourceDriftPhase),
        Box::new(DecisionPhase),
        Box::new(IncidentPhase),
    ]
}
