use super::{FlowStep, StepIndex, Target};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Assembles a [`FlowStep`]. This is the only way to produce a step, so every
/// step goes through the same canonical shape.
#[derive(Debug, Clone)]
pub struct FlowStepBuilder {
    index: Option<StepIndex>,
    title: String,
    description: String,
    failure_code: String,
    on_success: Target,
    on_failure: Target,
    constraints: Map<String, Value>,
    cost: BTreeMap<String, f64>,
}

impl FlowStepBuilder {
    /// Starts a step at wire index `index`. A negative index yields an
    /// unaddressable step that no graph will store.
    pub fn new(index: i64) -> Self {
        Self {
            index: StepIndex::try_from(index).ok(),
            title: String::new(),
            description: String::new(),
            failure_code: String::new(),
            on_success: Target::End,
            on_failure: Target::End,
            constraints: Map::new(),
            cost: BTreeMap::new(),
        }
    }

    pub(super) fn from_step(step: &FlowStep) -> Self {
        Self {
            index: step.index,
            title: step.title.clone(),
            description: step.description.clone(),
            failure_code: step.failure_code.clone(),
            on_success: step.on_success,
            on_failure: step.on_failure,
            constraints: step.constraints.clone(),
            cost: step.cost.clone(),
        }
    }

    pub fn index(mut self, index: i64) -> Self {
        self.index = StepIndex::try_from(index).ok();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn failure_code(mut self, failure_code: impl Into<String>) -> Self {
        self.failure_code = failure_code.into();
        self
    }

    pub fn on_success(mut self, target: Target) -> Self {
        self.on_success = target;
        self
    }

    pub fn on_failure(mut self, target: Target) -> Self {
        self.on_failure = target;
        self
    }

    /// Adds or replaces one constraint entry.
    pub fn constraint(mut self, key: impl Into<String>, value: Value) -> Self {
        self.constraints.insert(key.into(), value);
        self
    }

    /// Replaces all constraints.
    pub fn constraints(mut self, constraints: Map<String, Value>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Adds or replaces one cost entry. Non-finite values are ignored since they
    /// have no JSON representation.
    pub fn cost(mut self, key: impl Into<String>, value: f64) -> Self {
        if value.is_finite() {
            self.cost.insert(key.into(), value);
        }
        self
    }

    /// Replaces all cost entries, keeping only the finite ones.
    pub fn costs<I, K>(mut self, cost: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        self.cost = cost
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(k, v)| (k.into(), v))
            .collect();
        self
    }

    pub fn build(self) -> FlowStep {
        FlowStep {
            index: self.index,
            title: self.title,
            description: self.description,
            failure_code: self.failure_code,
            on_success: self.on_success,
            on_failure: self.on_failure,
            constraints: self.constraints,
            cost: self.cost,
        }
    }
}
