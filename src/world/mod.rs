//! World state - actors, relationship graph, pending effects

pub mod actor;
pub mod loader;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::calendar::WorldCalendar;
use crate::core::config::SimulationConfig;
use crate::core::types::{ActorId, BlocId, PowerClass};
use crate::simulation::ripple::DelayedEffect;
use crate::world::actor::Actor;

/// The world state owned by the simulation engine
///
/// Single-threaded by design: the engine owns this for the duration of one
/// `step` call and no other holder mutates it concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Master seed; per-tick randomness is derived from (seed, tick)
    pub seed: u64,
    pub calendar: WorldCalendar,
    pub config: SimulationConfig,

    /// Scheduler-visible tick index, wrapped modulo the schedule period
    pub schedule_tick: u64,

    actors: Vec<Actor>,
    actor_index: AHashMap<ActorId, usize>,

    /// Delayed ripple effects awaiting their trigger tick
    pub pending_effects: Vec<DelayedEffect>,

    next_actor_id: u32,
    next_effect_id: u64,
}

impl WorldState {
    pub fn new(seed: u64, config: SimulationConfig) -> Self {
        Self {
            seed,
            calendar: WorldCalendar::default(),
            config,
            schedule_tick: 0,
            actors: Vec::new(),
            actor_index: AHashMap::new(),
            pending_effects: Vec::new(),
            next_actor_id: 1,
            next_effect_id: 1,
        }
    }

    pub fn with_start_year(seed: u64, config: SimulationConfig, start_year: i32) -> Self {
        let mut world = Self::new(seed, config);
        world.calendar = WorldCalendar::new(start_year);
        world
    }

    /// Create and register a new actor
    pub fn spawn_actor(&mut self, name: impl Into<String>, class: PowerClass) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;

        let actor = Actor::new(id, name, class);
        self.actor_index.insert(id, self.actors.len());
        self.actors.push(actor);
        id
    }

    pub fn get_actor(&self, id: ActorId) -> Option<&Actor> {
        self.actor_index.get(&id).map(|&i| &self.actors[i])
    }

    pub fn get_actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        let idx = *self.actor_index.get(&id)?;
        Some(&mut self.actors[idx])
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn actors_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    pub fn actor_ids(&self) -> Vec<ActorId> {
        self.actors.iter().map(|a| a.id).collect()
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// All actors sharing the given bloc
    pub fn bloc_members(&self, bloc: BlocId) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|a| a.blocs.contains(&bloc))
            .map(|a| a.id)
            .collect()
    }

    /// Co-members of any bloc the given actor belongs to, excluding the
    /// actor itself
    pub fn bloc_co_members(&self, id: ActorId) -> Vec<ActorId> {
        let Some(actor) = self.get_actor(id) else {
            return Vec::new();
        };
        self.actors
            .iter()
            .filter(|other| other.id != id && actor.shares_bloc_with(other))
            .map(|a| a.id)
            .collect()
    }

    /// Record a symmetric neighbor relation
    pub fn link_neighbors(&mut self, a: ActorId, b: ActorId) {
        self.link(a, b, |actor, other| {
            if !actor.neighbors.contains(&other) {
                actor.neighbors.push(other);
            }
        });
    }

    /// Record a symmetric alliance
    pub fn link_allies(&mut self, a: ActorId, b: ActorId) {
        self.link(a, b, |actor, other| {
            if !actor.allies.contains(&other) {
                actor.allies.push(other);
            }
        });
    }

    /// Record a symmetric rivalry
    pub fn link_rivals(&mut self, a: ActorId, b: ActorId) {
        self.link(a, b, |actor, other| {
            if !actor.rivals.contains(&other) {
                actor.rivals.push(other);
            }
        });
    }

    fn link(&mut self, a: ActorId, b: ActorId, mut add: impl FnMut(&mut Actor, ActorId)) {
        if a == b {
            return;
        }
        if let Some(actor) = self.get_actor_mut(a) {
            add(actor, b);
        }
        if let Some(actor) = self.get_actor_mut(b) {
            add(actor, a);
        }
    }

    pub fn next_effect_id(&mut self) -> u64 {
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        id
    }

    /// Count of actors per class
    pub fn tier_distribution(&self) -> AHashMap<PowerClass, usize> {
        let mut distribution = AHashMap::new();
        for actor in &self.actors {
            *distribution.entry(actor.class).or_insert(0) += 1;
        }
        distribution
    }
}
