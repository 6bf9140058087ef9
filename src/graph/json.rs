use super::{FlowGraph, StepMap};
use crate::error::FlowGraphError;
use crate::step::{FlowStep, KEY_DESCRIPTION, TERMINAL_WIRE};
use crate::value::{int_or, string_or};
use serde_json::{Map, Value};
use std::fs;
use tracing::debug;

pub(crate) const KEY_NAME: &str = "name";
pub(crate) const KEY_STEPS: &str = "stepsByIndex";

impl FlowGraph {
    /// Decodes a graph from a JSON payload. Never fails.
    ///
    /// `stepsByIndex` is read as an object of per-step payloads. Keys that do not
    /// decode to a non-negative integer and values that are not objects are
    /// skipped. Each step is stored under its own decoded `index`, not the
    /// textual key, and steps without a usable index are dropped. An array of
    /// step payloads is accepted in place of the object.
    pub fn from_json(payload: &Value) -> FlowGraph {
        let name = string_or(payload.get(KEY_NAME), "");
        let description = string_or(payload.get(KEY_DESCRIPTION), "");

        let mut steps = StepMap::new();
        match payload.get(KEY_STEPS) {
            Some(Value::Object(entries)) => {
                for (key, entry) in entries {
                    let decoded_key = int_or(Some(&Value::from(key.as_str())), TERMINAL_WIRE);
                    if decoded_key < 0 {
                        debug!(key = key.as_str(), "Skipping step entry with non-addressable key");
                        continue;
                    }
                    store_entry(&mut steps, entry);
                }
            }
            Some(Value::Array(entries)) => {
                for entry in entries {
                    store_entry(&mut steps, entry);
                }
            }
            Some(other) if !other.is_null() => {
                debug!("Ignoring step container that is neither an object nor an array");
            }
            _ => {}
        }

        FlowGraph::from_storage(name, description, steps)
    }

    /// Decodes a graph from JSON text. Only text that is not JSON is an error;
    /// the decoded value is read leniently by [`FlowGraph::from_json`].
    pub fn from_json_str(text: &str) -> Result<FlowGraph, FlowGraphError> {
        let payload: Value = serde_json::from_str(text)?;
        Ok(FlowGraph::from_json(&payload))
    }

    /// Encodes the graph with steps emitted in ascending index order.
    pub fn to_json(&self) -> Value {
        let steps = self
            .steps_sorted()
            .into_iter()
            .map(|step| (step.wire_index().to_string(), step.to_json()))
            .collect::<Map<_, _>>();

        let mut out = Map::new();
        out.insert(KEY_NAME.to_string(), Value::from(self.name.as_str()));
        out.insert(KEY_DESCRIPTION.to_string(), Value::from(self.description.as_str()));
        out.insert(KEY_STEPS.to_string(), Value::Object(steps));
        Value::Object(out)
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    pub fn to_json_string_pretty(&self) -> String {
        format!("{:#}", self.to_json())
    }

    /// Loads a graph from a JSON file.
    pub fn from_file(path: &str) -> Result<FlowGraph, FlowGraphError> {
        let text = fs::read_to_string(path).map_err(|source| FlowGraphError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Writes the graph to a file as pretty-printed JSON.
    pub fn save(&self, path: &str) -> Result<(), FlowGraphError> {
        fs::write(path, self.to_json_string_pretty()).map_err(|source| FlowGraphError::Io {
            path: path.to_string(),
            source,
        })
    }
}

fn store_entry(steps: &mut StepMap, entry: &Value) {
    if !entry.is_object() {
        debug!("Skipping step entry that is not an object");
        return;
    }
    let step = FlowStep::from_json(entry);
    match step.index() {
        Some(index) => {
            steps.insert(index, step);
        }
        None => debug!("Skipping step entry without an addressable index"),
    }
}

impl From<FlowGraph> for Value {
    fn from(graph: FlowGraph) -> Self {
        graph.to_json()
    }
}

impl From<Value> for FlowGraph {
    fn from(payload: Value) -> Self {
        FlowGraph::from_json(&payload)
    }
}
