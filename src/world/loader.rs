//! Load world scenarios from TOML files

use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{ActorId, BlocId, PowerClass};
use crate::world::WorldState;

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    seed: u64,
    #[serde(default = "default_start_year")]
    start_year: i32,
    #[serde(default)]
    config: SimulationConfig,
    #[serde(default)]
    actors: Vec<ActorSpec>,
}

fn default_start_year() -> i32 {
    1960
}

#[derive(Debug, Deserialize)]
struct ActorSpec {
    name: String,
    /// Class rank, 1 (strongest) to 5
    class: u8,
    #[serde(default)]
    military: f32,
    #[serde(default)]
    economy: f32,
    #[serde(default)]
    stability: f32,
    #[serde(default)]
    soft_power: f32,
    #[serde(default)]
    projection: f32,
    #[serde(default)]
    arsenal: bool,
    #[serde(default)]
    neighbors: Vec<String>,
    #[serde(default)]
    allies: Vec<String>,
    #[serde(default)]
    rivals: Vec<String>,
    #[serde(default)]
    blocs: Vec<String>,
    protector: Option<String>,
}

/// Build a world from scenario TOML text
///
/// Duplicate actor names and invalid class ranks are scenario errors;
/// relation entries naming unknown actors are logged and skipped, matching
/// the engine's degrade-to-no-op policy.
pub fn load_scenario_str(text: &str) -> Result<WorldState> {
    let scenario: ScenarioFile = toml::from_str(text)?;

    scenario
        .config
        .validate()
        .map_err(SimError::InvalidConfig)?;

    let mut world =
        WorldState::with_start_year(scenario.seed, scenario.config, scenario.start_year);

    // First pass: spawn actors and build the name index
    let mut by_name: AHashMap<String, ActorId> = AHashMap::new();
    let mut bloc_ids: AHashMap<String, BlocId> = AHashMap::new();

    for spec in &scenario.actors {
        let class = PowerClass::from_rank(spec.class).ok_or_else(|| {
            SimError::InvalidScenario(format!(
                "actor '{}' has invalid class rank {}",
                spec.name, spec.class
            ))
        })?;

        if by_name.contains_key(&spec.name) {
            return Err(SimError::InvalidScenario(format!(
                "duplicate actor name '{}'",
                spec.name
            )));
        }

        let id = world.spawn_actor(spec.name.clone(), class);
        by_name.insert(spec.name.clone(), id);

        let actor = world.get_actor_mut(id).expect("actor just spawned");
        actor.metrics.military = spec.military;
        actor.metrics.economy = spec.economy;
        actor.metrics.stability = spec.stability;
        actor.metrics.soft_power = spec.soft_power;
        actor.metrics.projection = spec.projection;
        actor.has_strategic_arsenal = spec.arsenal;

        for bloc_name in &spec.blocs {
            let next = BlocId(bloc_ids.len() as u32 + 1);
            let bloc = *bloc_ids.entry(bloc_name.clone()).or_insert(next);
            actor.blocs.push(bloc);
        }
    }

    // Second pass: resolve relations by name
    for spec in &scenario.actors {
        let id = by_name[&spec.name];

        for (kind, names) in [
            ("neighbor", &spec.neighbors),
            ("ally", &spec.allies),
            ("rival", &spec.rivals),
        ] {
            for other_name in names {
                let Some(&other) = by_name.get(other_name) else {
                    tracing::warn!(
                        actor = %spec.name,
                        relation = kind,
                        missing = %other_name,
                        "relation names unknown actor; skipped"
                    );
                    continue;
                };
                match kind {
                    "neighbor" => world.link_neighbors(id, other),
                    "ally" => world.link_allies(id, other),
                    _ => world.link_rivals(id, other),
                }
            }
        }

        if let Some(protector_name) = &spec.protector {
            match by_name.get(protector_name) {
                Some(&protector) if protector != id => {
                    world.get_actor_mut(id).expect("actor exists").protector = Some(protector);
                }
                _ => {
                    tracing::warn!(
                        actor = %spec.name,
                        missing = %protector_name,
                        "protector names unknown actor; skipped"
                    );
                }
            }
        }
    }

    Ok(world)
}

/// Build a world from a scenario file on disk
pub fn load_scenario(path: &Path) -> Result<WorldState> {
    let text = std::fs::read_to_string(path)?;
    load_scenario_str(&text)
}
