//! Actor - a simulated political entity and its relationship sets

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, BlocId, DecisionDepth, PowerClass, Stat};

/// Lower bound for every power statistic
pub const STAT_MIN: f32 = 0.0;
/// Upper bound for every power statistic
pub const STAT_MAX: f32 = 100.0;

/// Bounded power statistics (0-100 each)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerMetrics {
    pub military: f32,
    pub economy: f32,
    pub stability: f32,
    pub soft_power: f32,
    /// Ability to project force beyond the actor's own borders; the
    /// classifier's secondary capability metric
    pub projection: f32,
}

impl PowerMetrics {
    pub fn get(&self, stat: Stat) -> f32 {
        match stat {
            Stat::Military => self.military,
            Stat::Economy => self.economy,
            Stat::Stability => self.stability,
            Stat::SoftPower => self.soft_power,
            Stat::Projection => self.projection,
        }
    }

    fn get_mut(&mut self, stat: Stat) -> &mut f32 {
        match stat {
            Stat::Military => &mut self.military,
            Stat::Economy => &mut self.economy,
            Stat::Stability => &mut self.stability,
            Stat::SoftPower => &mut self.soft_power,
            Stat::Projection => &mut self.projection,
        }
    }

    /// Composite power score used by the tier classifier
    ///
    /// Military and economy dominate; stability and soft power temper the
    /// score so a large but collapsing state reads weaker than its raw
    /// strength.
    pub fn composite_score(&self) -> f32 {
        self.military * 0.35 + self.economy * 0.35 + self.stability * 0.15 + self.soft_power * 0.15
    }
}

/// A simulated political entity (nation or sub-national unit)
///
/// Actors are created at world load and never destroyed; class changes and
/// stat deltas mutate them in place. Relationship sets hold ids only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub class: PowerClass,
    pub metrics: PowerMetrics,

    // Relationship graph (non-owning id references)
    pub neighbors: Vec<ActorId>,
    pub allies: Vec<ActorId>,
    pub rivals: Vec<ActorId>,
    pub blocs: Vec<BlocId>,
    pub protector: Option<ActorId>,

    /// Possession of a rare strategic asset; capability gate for the top
    /// classes
    pub has_strategic_arsenal: bool,

    /// Ticks between scheduler selections (positive)
    pub process_frequency: u64,
    pub decision_depth: DecisionDepth,

    /// Consecutive classifier passes with a differing natural class.
    /// Zero whenever natural class equals current class.
    pub reclass_counter: u32,
}

impl Actor {
    pub fn new(id: ActorId, name: impl Into<String>, class: PowerClass) -> Self {
        Self {
            id,
            name: name.into(),
            class,
            metrics: PowerMetrics::default(),
            neighbors: Vec::new(),
            allies: Vec::new(),
            rivals: Vec::new(),
            blocs: Vec::new(),
            protector: None,
            has_strategic_arsenal: false,
            process_frequency: class.process_frequency(),
            decision_depth: class.decision_depth(),
            reclass_counter: 0,
        }
    }

    /// Apply a signed delta to one stat, clamping to [STAT_MIN, STAT_MAX].
    ///
    /// This is the single point where range clamping happens; effect maps
    /// and ripple deltas carry raw values.
    pub fn apply_stat_delta(&mut self, stat: Stat, delta: f32) -> f32 {
        let slot = self.metrics.get_mut(stat);
        *slot = (*slot + delta).clamp(STAT_MIN, STAT_MAX);
        *slot
    }

    /// Apply a full delta map in deterministic stat order
    pub fn apply_deltas(&mut self, deltas: &AHashMap<Stat, f32>) {
        for stat in Stat::ALL {
            if let Some(delta) = deltas.get(&stat) {
                self.apply_stat_delta(stat, *delta);
            }
        }
    }

    pub fn is_ally_of(&self, other: ActorId) -> bool {
        self.allies.contains(&other)
    }

    pub fn is_rival_of(&self, other: ActorId) -> bool {
        self.rivals.contains(&other)
    }

    pub fn is_neighbor_of(&self, other: ActorId) -> bool {
        self.neighbors.contains(&other)
    }

    pub fn shares_bloc_with(&self, other: &Actor) -> bool {
        self.blocs.iter().any(|b| other.blocs.contains(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_actor() -> Actor {
        Actor::new(ActorId(1), "Arcadia", PowerClass::GreatPower)
    }

    #[test]
    fn test_new_actor_takes_class_frequency() {
        let actor = test_actor();
        assert_eq!(actor.process_frequency, 1);
        assert_eq!(actor.decision_depth, DecisionDepth::Full);
        assert_eq!(actor.reclass_counter, 0);

        let minor = Actor::new(ActorId(2), "Borduria", PowerClass::MinorPower);
        assert_eq!(minor.process_frequency, 5);
        assert_eq!(minor.decision_depth, DecisionDepth::Minimal);
    }

    #[test]
    fn test_stat_delta_clamps_at_bounds() {
        let mut actor = test_actor();
        actor.metrics.economy = 95.0;

        let after = actor.apply_stat_delta(Stat::Economy, 20.0);
        assert_eq!(after, STAT_MAX);

        let after = actor.apply_stat_delta(Stat::Economy, -150.0);
        assert_eq!(after, STAT_MIN);
    }

    #[test]
    fn test_apply_deltas_touches_only_listed_stats() {
        let mut actor = test_actor();
        actor.metrics.military = 50.0;
        actor.metrics.stability = 50.0;

        let mut deltas = AHashMap::new();
        deltas.insert(Stat::Stability, -10.0);
        actor.apply_deltas(&deltas);

        assert_eq!(actor.metrics.stability, 40.0);
        assert_eq!(actor.metrics.military, 50.0);
    }

    #[test]
    fn test_composite_score_weighting() {
        let mut actor = test_actor();
        actor.metrics = PowerMetrics {
            military: 100.0,
            economy: 100.0,
            stability: 100.0,
            soft_power: 100.0,
            projection: 0.0,
        };
        assert!((actor.metrics.composite_score() - 100.0).abs() < 1e-5);
    }

    #[test]
    fn test_bloc_overlap() {
        let mut a = test_actor();
        let mut b = Actor::new(ActorId(2), "Borduria", PowerClass::MiddlePower);
        assert!(!a.shares_bloc_with(&b));

        a.blocs.push(BlocId(7));
        b.blocs.push(BlocId(7));
        assert!(a.shares_bloc_with(&b));
    }
}
