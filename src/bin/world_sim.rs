//! World simulation runner
//! Drives the causal core for a number of ticks and prints a history digest

use clap::Parser;
use std::path::PathBuf;

use pax_mundi::core::config::SimulationConfig;
use pax_mundi::core::error::Result;
use pax_mundi::core::types::PowerClass;
use pax_mundi::simulation::phases::reference_phases;
use pax_mundi::simulation::tick::SimulationEngine;
use pax_mundi::timeline::EventKind;
use pax_mundi::world::{loader, WorldState};

/// Run the geopolitical causal core with the reference phase stack
#[derive(Parser, Debug)]
#[command(name = "world_sim")]
#[command(about = "Run a deterministic world simulation")]
struct Args {
    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks (months) to simulate
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Scenario TOML file; a small built-in world is used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Print every committed event
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pax_mundi=info".parse().expect("valid directive")),
        )
        .init();

    let args = Args::parse();

    let world = match &args.scenario {
        Some(path) => loader::load_scenario(path)?,
        None => builtin_world(args.seed),
    };

    println!("=== PAX MUNDI: WORLD SIMULATION ===");
    println!(
        "{} actors, seed {}, {} ticks\n",
        world.actor_count(),
        world.seed,
        args.ticks
    );

    let mut engine = SimulationEngine::new(world);
    let mut phases = reference_phases();

    for _ in 0..args.ticks {
        let events = engine.step(&mut phases);
        if args.verbose {
            for event in &events {
                let name = engine
                    .world
                    .get_actor(event.actor)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| format!("{:?}", event.actor));
                println!(
                    "{}  [{}] {:?} by {}",
                    event.date, event.importance, event.kind, name
                );
            }
        }
    }

    print_digest(&engine);
    Ok(())
}

/// A small fixed world for runs without a scenario file
fn builtin_world(seed: u64) -> WorldState {
    let mut world = WorldState::new(seed, SimulationConfig::default());

    let arcadia = world.spawn_actor("Arcadia", PowerClass::Superpower);
    let borduria = world.spawn_actor("Borduria", PowerClass::GreatPower);
    let cimmeria = world.spawn_actor("Cimmeria", PowerClass::RegionalPower);
    let drachenfel = world.spawn_actor("Drachenfel", PowerClass::MiddlePower);
    let elbonia = world.spawn_actor("Elbonia", PowerClass::MinorPower);

    let strengths = [
        (arcadia, 90.0, 88.0, 70.0, 75.0, 85.0, true),
        (borduria, 78.0, 72.0, 55.0, 60.0, 65.0, true),
        (cimmeria, 55.0, 58.0, 50.0, 45.0, 45.0, false),
        (drachenfel, 35.0, 38.0, 45.0, 30.0, 20.0, false),
        (elbonia, 15.0, 20.0, 35.0, 18.0, 5.0, false),
    ];
    for (id, mil, eco, sta, soft, proj, arsenal) in strengths {
        let actor = world.get_actor_mut(id).expect("actor just spawned");
        actor.metrics.military = mil;
        actor.metrics.economy = eco;
        actor.metrics.stability = sta;
        actor.metrics.soft_power = soft;
        actor.metrics.projection = proj;
        actor.has_strategic_arsenal = arsenal;
    }

    world.link_rivals(arcadia, borduria);
    world.link_neighbors(arcadia, cimmeria);
    world.link_neighbors(borduria, drachenfel);
    world.link_neighbors(cimmeria, drachenfel);
    world.link_neighbors(drachenfel, elbonia);
    world.link_allies(arcadia, cimmeria);
    world.link_allies(borduria, drachenfel);
    world.get_actor_mut(elbonia).expect("spawned").protector = Some(arcadia);

    world
}

fn print_digest(engine: &SimulationEngine) {
    println!("\n=== DIGEST ===");
    println!("final date: {}", engine.current_date());
    println!("events committed: {}", engine.timeline.len());
    println!("pending delayed effects: {}", engine.pending_effect_count());

    let mut distribution: Vec<(PowerClass, usize)> =
        engine.tier_distribution().into_iter().collect();
    distribution.sort_by_key(|&(class, _)| class.rank());
    println!("tier distribution:");
    for (class, count) in distribution {
        println!("  {:?}: {}", class, count);
    }

    let mut counts: Vec<(EventKind, usize)> = Vec::new();
    for event in engine.timeline.iter() {
        match counts.iter_mut().find(|(kind, _)| *kind == event.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((event.kind, 1)),
        }
    }
    counts.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
    println!("event kinds:");
    for (kind, count) in counts {
        println!("  {:?}: {}", kind, count);
    }

    let recent = engine
        .timeline
        .recent_events(engine.current_date(), 24, 5);
    println!("most notable recent events:");
    for event in recent {
        let name = engine
            .world
            .get_actor(event.actor)
            .map(|a| a.name.clone())
            .unwrap_or_else(|| format!("{:?}", event.actor));
        println!(
            "  {}  [{}] {:?} by {}",
            event.date, event.importance, event.kind, name
        );
    }
}
