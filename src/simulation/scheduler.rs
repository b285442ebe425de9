//! Processing scheduler - frequency-based sampling of due actors
//!
//! An actor with frequency N is selected exactly once in every window of N
//! consecutive tick indices. Pure selection; no side effects.

use crate::core::types::{ActorId, Tick};
use crate::world::WorldState;

/// Treat a zero frequency as 1 rather than dividing by it
fn normalized_frequency(frequency: u64) -> u64 {
    if frequency == 0 {
        tracing::warn!("actor with zero process_frequency treated as 1");
        1
    } else {
        frequency
    }
}

/// True iff an actor with the given frequency updates on this tick
pub fn is_due(frequency: u64, tick: Tick) -> bool {
    tick % normalized_frequency(frequency) == 0
}

/// The subset of actors due for update on this tick
pub fn due_actors(world: &WorldState, tick: Tick) -> Vec<ActorId> {
    world
        .actors()
        .filter(|a| is_due(a.process_frequency, tick))
        .map(|a| a.id)
        .collect()
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

/// Least common multiple of all actor frequencies currently in the world
pub fn schedule_period(world: &WorldState) -> u64 {
    world
        .actors()
        .map(|a| normalized_frequency(a.process_frequency))
        .fold(1, lcm)
}

/// Least common multiple of every frequency the class table defines; the
/// tick counter's modulus, making the sampling schedule periodic by
/// construction
///
/// Constant over a run even as actors reclassify, since every per-class
/// frequency divides it.
pub fn defined_period() -> u64 {
    crate::core::types::PowerClass::ALL
        .iter()
        .map(|c| c.process_frequency())
        .fold(1, lcm)
}
