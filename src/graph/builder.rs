use super::FlowGraph;
use crate::step::FlowStep;

/// Collects graph labels and steps before normalizing them into a [`FlowGraph`].
///
/// Steps are applied in the order they were added, so the usual
/// last-write-wins rule holds for duplicate indices.
#[derive(Debug, Clone, Default)]
pub struct FlowGraphBuilder {
    name: String,
    description: String,
    steps: Vec<FlowStep>,
}

impl FlowGraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn step(mut self, step: FlowStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = FlowStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn build(self) -> FlowGraph {
        FlowGraph::from_steps(self.name, self.description, self.steps)
    }
}
