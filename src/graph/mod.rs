//! The immutable, index-keyed container of flow steps.
//!
//! A [`FlowGraph`] owns its steps in a map keyed by [`StepIndex`]. Ordering is
//! never stored: the sorted list and the entry point are derived from the keys
//! on demand. Every operation that looks like a mutation returns a new graph and
//! leaves the receiver untouched; results that would be identical share the
//! receiver's storage.
pub mod builder;
pub mod json;

pub use builder::*;

use crate::step::{FlowStep, StepIndex, Target};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, trace};

/// Canonical step storage of a graph.
pub type StepMap = AHashMap<StepIndex, FlowStep>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "serde_json::Value", from = "serde_json::Value")]
pub struct FlowGraph {
    name: String,
    description: String,
    steps: Arc<StepMap>,
}

/// Replacement values for [`FlowGraph::copy_with`]. Fields left as `None` are
/// carried over from the source graph.
#[derive(Debug, Clone, Default)]
pub struct GraphChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    /// A raw replacement for the whole step map, keyed by wire index.
    pub steps_by_index: Option<AHashMap<i64, FlowStep>>,
}

impl GraphChanges {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn steps_by_index(mut self, steps: AHashMap<i64, FlowStep>) -> Self {
        self.steps_by_index = Some(steps);
        self
    }

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.steps_by_index.is_none()
    }
}

impl FlowGraph {
    pub fn builder(name: impl Into<String>) -> FlowGraphBuilder {
        FlowGraphBuilder::new(name)
    }

    /// A graph without steps.
    pub fn empty(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::from_storage(name.into(), description.into(), StepMap::new())
    }

    /// Builds a graph from a list of steps.
    ///
    /// Unaddressable steps are dropped. When two steps share an index the later
    /// one wins.
    pub fn from_steps<I>(name: impl Into<String>, description: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = FlowStep>,
    {
        let mut map = StepMap::new();
        for step in steps {
            match step.index() {
                Some(index) => {
                    map.insert(index, step);
                }
                None => debug!(title = step.title(), "Dropping unaddressable step"),
            }
        }
        Self::from_storage(name.into(), description.into(), map)
    }

    /// Builds a graph from `(key, step)` entries, storing each step under its
    /// entry key rather than its own index. A step whose own index disagrees
    /// with its key is re-indexed to the key, so storage and wire form agree.
    ///
    /// Entries with a negative key or an unaddressable step are dropped.
    pub fn from_map<I>(name: impl Into<String>, description: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, FlowStep)>,
    {
        let mut map = StepMap::new();
        for (key, step) in entries {
            let Ok(index) = StepIndex::try_from(key) else {
                debug!(key, "Dropping step stored under a non-addressable key");
                continue;
            };
            if !step.is_addressable() {
                debug!(key, "Dropping unaddressable step");
                continue;
            }
            let step = if step.index() == Some(index) {
                step
            } else {
                debug!(key, own = step.wire_index(), "Re-indexing step to its entry key");
                step.with_index(key)
            };
            map.insert(index, step);
        }
        Self::from_storage(name.into(), description.into(), map)
    }

    fn from_storage(name: String, description: String, steps: StepMap) -> Self {
        Self {
            name,
            description,
            steps: Arc::new(steps),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Read-only view of the canonical storage.
    pub fn steps_by_index(&self) -> &StepMap {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in ascending index order.
    pub fn steps_sorted(&self) -> Vec<&FlowStep> {
        self.steps
            .iter()
            .sorted_by_key(|(index, _)| **index)
            .map(|(_, step)| step)
            .collect()
    }

    /// All stored indices in ascending order.
    pub fn indices(&self) -> Vec<StepIndex> {
        self.steps.keys().copied().sorted().collect()
    }

    /// The smallest stored index, or [`Target::End`] for an empty graph.
    pub fn entry_index(&self) -> Target {
        Target::from(self.steps.keys().min().copied())
    }

    /// [`FlowGraph::entry_index`] in wire form, `-1` for an empty graph.
    pub fn entry_index_wire(&self) -> i64 {
        self.entry_index().to_wire()
    }

    /// The step stored under wire index `index`. The terminal sentinel and
    /// dangling indices both yield `None`.
    pub fn step_at(&self, index: i64) -> Option<&FlowStep> {
        self.step_at_target(Target::from_wire(index))
    }

    pub fn step_at_target(&self, target: Target) -> Option<&FlowStep> {
        target.resolve().and_then(|index| self.steps.get(&index))
    }

    pub fn contains(&self, index: i64) -> bool {
        self.step_at(index).is_some()
    }

    /// Whether both graphs are backed by the same storage, which is the case for
    /// results of operations that changed nothing.
    pub fn shares_storage(&self, other: &FlowGraph) -> bool {
        Arc::ptr_eq(&self.steps, &other.steps)
    }

    /// Inserts or replaces the step at its own index.
    ///
    /// Unaddressable steps, and steps equal to the one already stored, leave the
    /// graph as it is.
    pub fn upsert_step(&self, step: FlowStep) -> FlowGraph {
        let Some(index) = step.index() else {
            trace!("Ignoring upsert of unaddressable step");
            return self.clone();
        };
        if self.steps.get(&index) == Some(&step) {
            trace!(index, "Upserted step is unchanged");
            return self.clone();
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.steps).insert(index, step);
        next
    }

    /// Removes the step at wire index `index`, if one is stored there.
    pub fn remove_step_at(&self, index: i64) -> FlowGraph {
        let Ok(index) = StepIndex::try_from(index) else {
            trace!(index, "Ignoring removal at non-addressable index");
            return self.clone();
        };
        if !self.steps.contains_key(&index) {
            trace!(index, "Ignoring removal of absent step");
            return self.clone();
        }
        let mut next = self.clone();
        Arc::make_mut(&mut next.steps).remove(&index);
        next
    }

    /// Removes the step stored at `step`'s own index.
    pub fn remove_step(&self, step: &FlowStep) -> FlowGraph {
        self.remove_step_at(step.wire_index())
    }

    /// Derives a graph with some fields replaced.
    ///
    /// With no changes the result shares this graph's storage. Otherwise the
    /// steps pass through [`FlowGraph::from_map`] again, so a raw replacement map
    /// is normalized like any other input.
    pub fn copy_with(&self, changes: GraphChanges) -> FlowGraph {
        if changes.is_empty() {
            return self.clone();
        }
        let name = changes.name.unwrap_or_else(|| self.name.clone());
        let description = changes.description.unwrap_or_else(|| self.description.clone());
        match changes.steps_by_index {
            Some(entries) => FlowGraph::from_map(name, description, entries),
            None => FlowGraph::from_map(
                name,
                description,
                self.steps
                    .iter()
                    .map(|(index, step)| (Target::Step(*index).to_wire(), step.clone())),
            ),
        }
    }
}

impl PartialEq for FlowGraph {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && (self.shares_storage(other) || *self.steps == *other.steps)
    }
}

impl Eq for FlowGraph {}

impl Hash for FlowGraph {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.description.hash(state);
        self.steps.len().hash(state);
        for (index, step) in self.steps.iter().sorted_by_key(|(index, _)| **index) {
            index.hash(state);
            step.hash(state);
        }
    }
}
