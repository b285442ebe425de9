//! Pax Mundi - causal simulation core for a turn-based geopolitical
//! strategy simulator

pub mod core;
pub mod simulation;
pub mod snapshot;
pub mod timeline;
pub mod world;
