//! Engine-state snapshot for opaque serialization and exact resume
//!
//! Captures everything `step` depends on: seed, tick, calendar, config,
//! every actor (including hysteresis counters and frequencies), the
//! pending delayed-effect queue, and the full event log. Because per-tick
//! randomness is derived from (seed, tick), restoring a snapshot and
//! resuming reproduces a byte-identical event sequence.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::simulation::tick::SimulationEngine;
use crate::timeline::Timeline;
use crate::world::WorldState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub world: WorldState,
    pub timeline: Timeline,
}

impl EngineSnapshot {
    pub fn capture(engine: &SimulationEngine) -> Self {
        Self {
            world: engine.world.clone(),
            timeline: engine.timeline.clone(),
        }
    }

    pub fn restore(self) -> SimulationEngine {
        SimulationEngine::from_parts(self.world, self.timeline)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
