//! A single node of a flow graph.
pub mod builder;
pub mod target;

pub use builder::FlowStepBuilder;
pub use target::*;

use crate::value::{float_or_none, hash_cost, hash_object, int_or, object, string_or};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

pub(crate) const KEY_INDEX: &str = "index";
pub(crate) const KEY_TITLE: &str = "title";
pub(crate) const KEY_DESCRIPTION: &str = "description";
pub(crate) const KEY_FAILURE_CODE: &str = "failureCode";
pub(crate) const KEY_ON_SUCCESS: &str = "nextOnSuccessIndex";
pub(crate) const KEY_ON_FAILURE: &str = "nextOnFailureIndex";
pub(crate) const KEY_CONSTRAINTS: &str = "constraints";
pub(crate) const KEY_COST: &str = "cost";

/// One step of a flow: its identity, labels, where success and failure lead,
/// and opaque metadata.
///
/// Steps are immutable. Build them with [`FlowStep::builder`] and derive changed
/// copies with [`FlowStep::to_builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Value", from = "Value")]
pub struct FlowStep {
    index: Option<StepIndex>,
    title: String,
    description: String,
    failure_code: String,
    on_success: Target,
    on_failure: Target,
    constraints: Map<String, Value>,
    cost: BTreeMap<String, f64>,
}

// Cost values are always finite, so equality is reflexive.
impl Eq for FlowStep {}

impl Hash for FlowStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.title.hash(state);
        self.description.hash(state);
        self.failure_code.hash(state);
        self.on_success.hash(state);
        self.on_failure.hash(state);
        hash_object(&self.constraints, state);
        hash_cost(&self.cost, state);
    }
}

impl FlowStep {
    pub fn builder(index: i64) -> FlowStepBuilder {
        FlowStepBuilder::new(index)
    }

    /// A builder pre-filled with this step's fields.
    pub fn to_builder(&self) -> FlowStepBuilder {
        FlowStepBuilder::from_step(self)
    }

    /// A copy of this step under another wire index.
    pub fn with_index(&self, index: i64) -> FlowStep {
        self.to_builder().index(index).build()
    }

    /// The step's own index, `None` for an unaddressable step.
    pub fn index(&self) -> Option<StepIndex> {
        self.index
    }

    /// The step's own index as it appears on the wire.
    pub fn wire_index(&self) -> i64 {
        Target::from(self.index).to_wire()
    }

    /// Whether a graph can store this step.
    pub fn is_addressable(&self) -> bool {
        self.index.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn failure_code(&self) -> &str {
        &self.failure_code
    }

    pub fn on_success(&self) -> Target {
        self.on_success
    }

    pub fn on_failure(&self) -> Target {
        self.on_failure
    }

    pub fn constraints(&self) -> &Map<String, Value> {
        &self.constraints
    }

    pub fn cost(&self) -> &BTreeMap<String, f64> {
        &self.cost
    }

    pub fn is_terminal_on_success(&self) -> bool {
        self.on_success.is_end()
    }

    pub fn is_terminal_on_failure(&self) -> bool {
        self.on_failure.is_end()
    }

    /// The success target followed by the failure target.
    pub fn targets(&self) -> impl Iterator<Item = Target> {
        [self.on_success, self.on_failure].into_iter()
    }

    /// Decodes a step from a JSON payload, defaulting every field that is absent
    /// or mistyped. A missing index produces an unaddressable step and missing
    /// targets point at [`Target::End`].
    pub fn from_json(payload: &Value) -> FlowStep {
        let field = |key: &str| payload.get(key);

        let constraints = object(field(KEY_CONSTRAINTS)).cloned().unwrap_or_default();
        let cost = object(field(KEY_COST))
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(k, v)| float_or_none(Some(v)).map(|f| (k.clone(), f)))
                    .collect::<BTreeMap<_, _>>()
            })
            .unwrap_or_default();

        FlowStep::builder(int_or(field(KEY_INDEX), TERMINAL_WIRE))
            .title(string_or(field(KEY_TITLE), ""))
            .description(string_or(field(KEY_DESCRIPTION), ""))
            .failure_code(string_or(field(KEY_FAILURE_CODE), ""))
            .on_success(Target::from_wire(int_or(field(KEY_ON_SUCCESS), TERMINAL_WIRE)))
            .on_failure(Target::from_wire(int_or(field(KEY_ON_FAILURE), TERMINAL_WIRE)))
            .constraints(constraints)
            .costs(cost)
            .build()
    }

    /// Encodes the step with the same keys [`FlowStep::from_json`] reads.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert(KEY_INDEX.to_string(), Value::from(self.wire_index()));
        out.insert(KEY_TITLE.to_string(), Value::from(self.title.as_str()));
        out.insert(KEY_DESCRIPTION.to_string(), Value::from(self.description.as_str()));
        out.insert(KEY_FAILURE_CODE.to_string(), Value::from(self.failure_code.as_str()));
        out.insert(KEY_ON_SUCCESS.to_string(), Value::from(self.on_success.to_wire()));
        out.insert(KEY_ON_FAILURE.to_string(), Value::from(self.on_failure.to_wire()));
        out.insert(KEY_CONSTRAINTS.to_string(), Value::Object(self.constraints.clone()));
        let cost = self
            .cost
            .iter()
            .map(|(k, v)| (k.clone(), Value::from(*v)))
            .collect::<Map<_, _>>();
        out.insert(KEY_COST.to_string(), Value::Object(cost));
        Value::Object(out)
    }
}

impl From<FlowStep> for Value {
    fn from(step: FlowStep) -> Self {
        step.to_json()
    }
}

impl From<Value> for FlowStep {
    fn from(payload: Value) -> Self {
        FlowStep::from_json(&payload)
    }
}
