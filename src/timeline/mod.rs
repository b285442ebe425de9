//! Timeline event store - append-only causal event log
//!
//! Events are kept sorted by date. Causal links (`caused_by` / `triggers`)
//! form a directed tree of event ids; traversal is iterative with a
//! visited set so a malformed cycle can never hang a query.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::calendar::WorldDate;
use crate::core::types::{ActorId, EventId, PowerClass, Stat};

/// Per-event stat deltas keyed by target actor
pub type EffectMap = AHashMap<ActorId, AHashMap<Stat, f32>>;

/// Closed tag for event types; unknown-tag dispatch does not exist by
/// construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    WarDeclared,
    ArmedClash,
    Crisis,
    PoliticalUpheaval,
    EconomicShock,
    EconomicBoom,
    TradeAccord,
    DiplomaticBreakthrough,
    DiplomaticRupture,
    Reclassification,
    Spillover,
}

/// Coarse category driving propagation-rule lookup and per-relationship
/// effect signs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Conflict,
    Crisis,
    EconomicShock,
    EconomicBoon,
    DiplomaticSuccess,
    DiplomaticRupture,
    Administrative,
}

impl EventKind {
    pub fn category(&self) -> EventCategory {
        match self {
            EventKind::WarDeclared | EventKind::ArmedClash => EventCategory::Conflict,
            EventKind::Crisis | EventKind::PoliticalUpheaval => EventCategory::Crisis,
            EventKind::EconomicShock => EventCategory::EconomicShock,
            EventKind::EconomicBoom => EventCategory::EconomicBoon,
            EventKind::TradeAccord | EventKind::DiplomaticBreakthrough => {
                EventCategory::DiplomaticSuccess
            }
            EventKind::DiplomaticRupture => EventCategory::DiplomaticRupture,
            EventKind::Reclassification | EventKind::Spillover => EventCategory::Administrative,
        }
    }
}

/// Who or what generated an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    /// A domain phase, by name
    Phase(String),
    /// Derived by the ripple engine
    Ripple,
    /// Emitted by the tier classifier
    Classifier,
    /// Loaded from a scenario file
    Scenario,
}

/// A committed timeline event
///
/// Immutable once committed except for the `read` flag and the
/// append-only `triggers` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub date: WorldDate,
    pub actor: ActorId,
    pub targets: Vec<ActorId>,
    pub kind: EventKind,
    pub source: EventSource,
    /// 1-5, 5 = critical
    pub importance: u8,
    pub effects: EffectMap,
    pub caused_by: Option<EventId>,
    pub triggers: Vec<EventId>,
    /// Root events sit at depth 0; each derived ripple adds one
    pub causal_chain_depth: u32,
    /// Narrative weight; reduced for each derived ripple generation
    pub ripple_weight: f32,
    pub read: bool,
    /// Reclassification payload, present only for that kind
    pub class_change: Option<(PowerClass, PowerClass)>,
}

/// An event as produced by a phase or the ripple engine, before the
/// timeline assigns id and date
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub kind: EventKind,
    pub source: EventSource,
    pub actor: ActorId,
    pub targets: Vec<ActorId>,
    pub importance: u8,
    pub effects: EffectMap,
    pub caused_by: Option<EventId>,
    pub causal_chain_depth: u32,
    pub ripple_weight: f32,
    pub class_change: Option<(PowerClass, PowerClass)>,
}

impl EventDraft {
    pub fn new(kind: EventKind, source: EventSource, actor: ActorId, importance: u8) -> Self {
        Self {
            kind,
            source,
            actor,
            targets: Vec::new(),
            importance,
            effects: EffectMap::default(),
            caused_by: None,
            causal_chain_depth: 0,
            ripple_weight: 1.0,
            class_change: None,
        }
    }

    pub fn with_targets(mut self, targets: Vec<ActorId>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_effect(mut self, target: ActorId, stat: Stat, delta: f32) -> Self {
        self.effects.entry(target).or_default().insert(stat, delta);
        self
    }
}

/// Optional filters for date-range queries
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub kind: Option<EventKind>,
    pub actor: Option<ActorId>,
    pub min_importance: Option<u8>,
}

impl EventFilter {
    fn matches(&self, event: &Event) -> bool {
        if let Some(kind) = self.kind {
            if event.kind != kind {
                return false;
            }
        }
        if let Some(actor) = self.actor {
            if event.actor != actor && !event.targets.contains(&actor) {
                return false;
            }
        }
        if let Some(min) = self.min_importance {
            if event.importance < min {
                return false;
            }
        }
        true
    }
}

/// Append-only event log, kept sorted by date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    events: Vec<Event>,
    index: AHashMap<EventId, usize>,
    next_event_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a draft, assigning id and date. Importance is clamped into
    /// 1..=5. If the draft names a parent, the child id is appended to the
    /// parent's `triggers` (missing parent is logged and ignored).
    pub fn commit(&mut self, draft: EventDraft, date: WorldDate) -> EventId {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;

        let event = Event {
            id,
            date,
            actor: draft.actor,
            targets: draft.targets,
            kind: draft.kind,
            source: draft.source,
            importance: draft.importance.clamp(1, 5),
            effects: draft.effects,
            caused_by: draft.caused_by,
            triggers: Vec::new(),
            causal_chain_depth: draft.causal_chain_depth,
            ripple_weight: draft.ripple_weight,
            read: false,
            class_change: draft.class_change,
        };

        // Events arrive in date order during normal ticking; the binary
        // search handles decorative late appends.
        let pos = self.events.partition_point(|e| e.date <= date);
        if pos == self.events.len() {
            self.index.insert(id, pos);
            self.events.push(event);
        } else {
            self.events.insert(pos, event);
            for (i, e) in self.events.iter().enumerate().skip(pos) {
                self.index.insert(e.id, i);
            }
        }

        if let Some(parent) = draft.caused_by {
            self.link_trigger(parent, id);
        }

        id
    }

    /// Append `child` to `parent`'s triggers list
    pub fn link_trigger(&mut self, parent: EventId, child: EventId) {
        match self.index.get(&parent).copied() {
            Some(i) => {
                let triggers = &mut self.events[i].triggers;
                if !triggers.contains(&child) {
                    triggers.push(child);
                }
            }
            None => {
                tracing::warn!(?parent, ?child, "trigger link to unknown parent event dropped");
            }
        }
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.index.get(&id).map(|&i| &self.events[i])
    }

    /// Flip the decorative read flag; returns false for unknown ids
    pub fn mark_read(&mut self, id: EventId) -> bool {
        match self.index.get(&id).copied() {
            Some(i) => {
                self.events[i].read = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Events with `start <= date <= end`, optionally filtered
    pub fn events_in_range(
        &self,
        start: WorldDate,
        end: WorldDate,
        filter: &EventFilter,
    ) -> Vec<&Event> {
        let lo = self.events.partition_point(|e| e.date < start);
        let hi = self.events.partition_point(|e| e.date <= end);
        self.events[lo..hi]
            .iter()
            .filter(|e| filter.matches(e))
            .collect()
    }

    /// All events of a single calendar period
    pub fn events_for_period(&self, date: WorldDate) -> Vec<&Event> {
        self.events_in_range(date, date, &EventFilter::default())
    }

    /// Events within `lookback_months` of `now`, ordered by importance
    /// then recency, capped at `limit`
    ///
    /// Consumed by external narrative context builders.
    pub fn recent_events(&self, now: WorldDate, lookback_months: u32, limit: usize) -> Vec<&Event> {
        let mut recent: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| {
                let age = now.months_since(&e.date);
                age >= 0 && age <= lookback_months as i64
            })
            .collect();

        recent.sort_by(|a, b| {
            b.importance
                .cmp(&a.importance)
                .then(b.date.cmp(&a.date))
                .then(b.id.cmp(&a.id))
        });
        recent.truncate(limit);
        recent
    }

    /// The full causal chain containing `id`: walk `caused_by` back to the
    /// root, then collect every descendant through `triggers`.
    ///
    /// Returns events in breadth-first order from the root, so any member
    /// of a chain yields the same set. Traversal carries a visited set;
    /// a malformed cycle truncates silently instead of looping.
    pub fn get_event_chain(&self, id: EventId) -> Vec<&Event> {
        let Some(mut current) = self.get(id) else {
            return Vec::new();
        };

        // Ascend to the root
        let mut seen_up: AHashSet<EventId> = AHashSet::new();
        seen_up.insert(current.id);
        while let Some(parent_id) = current.caused_by {
            if !seen_up.insert(parent_id) {
                break;
            }
            match self.get(parent_id) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // Descend breadth-first through triggers
        let mut chain = Vec::new();
        let mut visited: AHashSet<EventId> = AHashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(current.id);
        visited.insert(current.id);

        while let Some(next_id) = queue.pop_front() {
            let Some(event) = self.get(next_id) else {
                continue;
            };
            chain.push(event);
            for &child in &event.triggers {
                if visited.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        chain
    }
}
