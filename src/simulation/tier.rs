//! Tier classifier - hysteresis-gated capability reclassification
//!
//! `natural_class` reads an ordered threshold table from strongest to
//! weakest; `check_reclassification` gates actual class changes behind a
//! per-actor counter so borderline actors do not oscillate, except for
//! multi-step jumps (collapse or breakthrough) which commit immediately.

use crate::core::config::SimulationConfig;
use crate::core::types::{ActorId, PowerClass};
use crate::timeline::{EventDraft, EventKind, EventSource};
use crate::world::actor::Actor;
use crate::world::WorldState;

/// One row of the classification table
struct ClassRequirement {
    class: PowerClass,
    min_composite: f32,
    min_projection: f32,
    requires_arsenal: bool,
}

/// Ordered strongest to weakest; the first fully satisfied row wins.
/// MinorPower is the fallback and has no row.
const CLASS_TABLE: [ClassRequirement; 4] = [
    ClassRequirement {
        class: PowerClass::Superpower,
        min_composite: 85.0,
        min_projection: 80.0,
        requires_arsenal: true,
    },
    ClassRequirement {
        class: PowerClass::GreatPower,
        min_composite: 70.0,
        min_projection: 60.0,
        requires_arsenal: true,
    },
    ClassRequirement {
        class: PowerClass::RegionalPower,
        min_composite: 50.0,
        min_projection: 40.0,
        requires_arsenal: false,
    },
    ClassRequirement {
        class: PowerClass::MiddlePower,
        min_composite: 30.0,
        min_projection: 15.0,
        requires_arsenal: false,
    },
];

/// The class an actor's metrics merit right now, ignoring hysteresis
pub fn natural_class(actor: &Actor) -> PowerClass {
    let composite = actor.metrics.composite_score();
    for row in &CLASS_TABLE {
        if composite >= row.min_composite
            && actor.metrics.projection >= row.min_projection
            && (!row.requires_arsenal || actor.has_strategic_arsenal)
        {
            return row.class;
        }
    }
    PowerClass::weakest()
}

/// Decide whether an actor's class change should commit this pass.
///
/// Resets the hysteresis counter when natural and current agree; commits
/// immediately on a jump of `immediate_jump_steps` or more; otherwise
/// increments the counter and commits once it reaches the promotion (3)
/// or demotion (5) threshold. Returns the new class when a change commits.
pub fn check_reclassification(actor: &mut Actor, config: &SimulationConfig) -> Option<PowerClass> {
    let natural = natural_class(actor);

    if natural == actor.class {
        actor.reclass_counter = 0;
        return None;
    }

    if natural.step_distance(&actor.class) >= config.immediate_jump_steps {
        actor.reclass_counter = 0;
        return Some(natural);
    }

    actor.reclass_counter += 1;
    let threshold = if natural.outranks(&actor.class) {
        config.promotion_threshold
    } else {
        config.demotion_threshold
    };

    if actor.reclass_counter >= threshold {
        actor.reclass_counter = 0;
        Some(natural)
    } else {
        None
    }
}

/// Commit a reclassification: class, processing frequency and decision
/// depth all move to the new class's values
pub fn apply_reclassification(actor: &mut Actor, new_class: PowerClass) {
    actor.class = new_class;
    actor.process_frequency = new_class.process_frequency();
    actor.decision_depth = new_class.decision_depth();
}

/// Run the classifier across every actor, committing changes and
/// returning reclassification event drafts in actor order
pub fn classify_all(world: &mut WorldState) -> Vec<EventDraft> {
    let mut drafts = Vec::new();
    let config = world.config.clone();

    let ids: Vec<ActorId> = world.actor_ids();
    for id in ids {
        let Some(actor) = world.get_actor_mut(id) else {
            continue;
        };

        if let Some(new_class) = check_reclassification(actor, &config) {
            let old_class = actor.class;
            let jump = new_class.step_distance(&old_class) >= config.immediate_jump_steps;
            apply_reclassification(actor, new_class);

            tracing::debug!(
                actor = %actor.name,
                ?old_class,
                ?new_class,
                immediate = jump,
                "actor reclassified"
            );

            let mut draft = EventDraft::new(
                EventKind::Reclassification,
                EventSource::Classifier,
                id,
                if jump { 4 } else { 3 },
            );
            draft.class_change = Some((old_class, new_class));
            drafts.push(draft);
        }
    }

    drafts
}
