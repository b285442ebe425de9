//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for actors (nations and sub-national units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for blocs (alliances, trade unions, pacts)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlocId(pub u32);

impl BlocId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for timeline events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u64);

/// Simulation tick counter (one tick = one calendar month)
pub type Tick = u64;

/// Capability bracket for actors (power class, not prestige)
///
/// Lower-numbered classes are stronger and are processed more frequently
/// by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PowerClass {
    Superpower = 1,
    GreatPower = 2,
    RegionalPower = 3,
    MiddlePower = 4,
    MinorPower = 5,
}

impl PowerClass {
    pub const ALL: [PowerClass; 5] = [
        PowerClass::Superpower,
        PowerClass::GreatPower,
        PowerClass::RegionalPower,
        PowerClass::MiddlePower,
        PowerClass::MinorPower,
    ];

    /// Numeric rank (1 = strongest)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn from_rank(rank: u8) -> Option<PowerClass> {
        match rank {
            1 => Some(PowerClass::Superpower),
            2 => Some(PowerClass::GreatPower),
            3 => Some(PowerClass::RegionalPower),
            4 => Some(PowerClass::MiddlePower),
            5 => Some(PowerClass::MinorPower),
            _ => None,
        }
    }

    pub fn weakest() -> PowerClass {
        PowerClass::MinorPower
    }

    /// Returns true if this class outranks (is stronger than) the other
    pub fn outranks(&self, other: &PowerClass) -> bool {
        self.rank() < other.rank()
    }

    /// Absolute distance between two classes in class-steps
    pub fn step_distance(&self, other: &PowerClass) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Processing frequency assigned to this class (ticks between updates)
    ///
    /// Class-1 and class-2 actors update every tick; weaker classes are
    /// sampled proportionally less often, bounding per-tick cost as the
    /// actor population grows.
    pub fn process_frequency(&self) -> u64 {
        match self {
            PowerClass::Superpower => 1,
            PowerClass::GreatPower => 1,
            PowerClass::RegionalPower => 2,
            PowerClass::MiddlePower => 3,
            PowerClass::MinorPower => 5,
        }
    }

    /// Decision-complexity level used by external decision systems
    pub fn decision_depth(&self) -> DecisionDepth {
        match self {
            PowerClass::Superpower | PowerClass::GreatPower => DecisionDepth::Full,
            PowerClass::RegionalPower => DecisionDepth::Standard,
            PowerClass::MiddlePower => DecisionDepth::Basic,
            PowerClass::MinorPower => DecisionDepth::Minimal,
        }
    }
}

/// How much deliberation an actor's decision phase is entitled to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionDepth {
    Full,
    Standard,
    Basic,
    Minimal,
}

/// A mutable power statistic carried by every actor, bounded 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Military,
    Economy,
    Stability,
    SoftPower,
    Projection,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Military,
        Stat::Economy,
        Stat::Stability,
        Stat::SoftPower,
        Stat::Projection,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_id_equality() {
        let a = ActorId(1);
        let b = ActorId(1);
        let c = ActorId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_power_class_ordering() {
        // Superpower outranks everything below it
        assert!(PowerClass::Superpower.outranks(&PowerClass::GreatPower));
        assert!(PowerClass::GreatPower.outranks(&PowerClass::RegionalPower));
        assert!(PowerClass::RegionalPower.outranks(&PowerClass::MiddlePower));
        assert!(PowerClass::MiddlePower.outranks(&PowerClass::MinorPower));

        // Weaker classes don't outrank stronger ones
        assert!(!PowerClass::MinorPower.outranks(&PowerClass::MiddlePower));
        assert!(!PowerClass::GreatPower.outranks(&PowerClass::Superpower));

        // Same class doesn't outrank itself
        assert!(!PowerClass::GreatPower.outranks(&PowerClass::GreatPower));
    }

    #[test]
    fn test_step_distance() {
        assert_eq!(
            PowerClass::Superpower.step_distance(&PowerClass::MinorPower),
            4
        );
        assert_eq!(
            PowerClass::MiddlePower.step_distance(&PowerClass::GreatPower),
            2
        );
        assert_eq!(
            PowerClass::GreatPower.step_distance(&PowerClass::GreatPower),
            0
        );
    }

    #[test]
    fn test_frequency_increases_with_weakness() {
        let mut last = 0;
        for class in PowerClass::ALL {
            assert!(class.process_frequency() >= last);
            last = class.process_frequency();
        }
        assert_eq!(PowerClass::Superpower.process_frequency(), 1);
        assert_eq!(PowerClass::MiddlePower.process_frequency(), 3);
    }

    #[test]
    fn test_from_rank_round_trip() {
        for class in PowerClass::ALL {
            assert_eq!(PowerClass::from_rank(class.rank()), Some(class));
        }
        assert_eq!(PowerClass::from_rank(0), None);
        assert_eq!(PowerClass::from_rank(6), None);
    }
}
