//! Simulation configuration with documented constants
//!
//! All tuning values are collected here with explanations of their purpose
//! and how they interact with each other. The config is owned by the world
//! state and passed explicitly; there is no process-wide config singleton.

use serde::{Deserialize, Serialize};

/// Configuration for the causal simulation core
///
/// These values have been tuned so the classifier resists oscillation and
/// ripple cascades stay bounded. Changing them affects pacing and the
/// density of derived events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === TIER CLASSIFIER ===
    /// Consecutive classifier passes an actor must spend above its current
    /// class before a promotion commits
    ///
    /// At 3, a sustained rise is rewarded within a year of classifier
    /// cadence while a single lucky quarter is not.
    pub promotion_threshold: u32,

    /// Consecutive classifier passes below the current class before a
    /// demotion commits
    ///
    /// Intentionally slower than promotion (5 vs 3) so transient weakness
    /// (a short recession, a lost border skirmish) does not strip status.
    pub demotion_threshold: u32,

    /// Class-step gap at which reclassification bypasses hysteresis
    ///
    /// A jump of this many steps represents a sudden collapse or
    /// breakthrough and commits immediately.
    pub immediate_jump_steps: u8,

    /// Ticks between full classifier sweeps
    ///
    /// Independent of per-actor processing frequency; every actor is
    /// examined on this cadence.
    pub classifier_cadence: u64,

    // === RIPPLE ENGINE ===
    /// Aggregate ripple strength above which a derived spillover event is
    /// recorded on the timeline
    ///
    /// Below this, effects still apply but are considered too diffuse to
    /// narrate.
    pub ripple_visibility_threshold: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            promotion_threshold: 3,
            demotion_threshold: 5,
            immediate_jump_steps: 2,
            classifier_cadence: 4,
            ripple_visibility_threshold: 0.3,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.promotion_threshold == 0 || self.demotion_threshold == 0 {
            return Err("hysteresis thresholds must be positive".into());
        }

        // Demotion must not be easier than promotion
        if self.demotion_threshold < self.promotion_threshold {
            return Err(format!(
                "demotion_threshold ({}) should be >= promotion_threshold ({})",
                self.demotion_threshold, self.promotion_threshold
            ));
        }

        if self.immediate_jump_steps < 2 {
            return Err("immediate_jump_steps below 2 would bypass hysteresis entirely".into());
        }

        if self.classifier_cadence == 0 {
            return Err("classifier_cadence must be positive".into());
        }

        if !(0.0..=1.0).contains(&self.ripple_visibility_threshold) {
            return Err(format!(
                "ripple_visibility_threshold ({}) must be within [0, 1]",
                self.ripple_visibility_threshold
            ));
        }

        Ok(())
    }
}
