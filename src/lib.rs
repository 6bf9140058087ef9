//! # flowgraph - Immutable Flow Graphs
//!
//! **flowgraph** models a deterministic flow as an immutable directed graph of
//! named steps. Each step carries a success target and a failure target; a
//! target is either another step's index or the terminal [`Target::End`],
//! which is written as `-1` on the wire and never stored as a step.
//!
//! ## Core Workflow
//!
//! 1.  **Build Steps**: Use [`FlowStep::builder`] to assemble steps with their
//!     transition targets and metadata.
//! 2.  **Assemble a Graph**: Collect the steps with [`FlowGraph::builder`],
//!     [`FlowGraph::from_steps`] or [`FlowGraph::from_map`]. Steps are keyed by
//!     index, duplicates resolve last-write-wins and unaddressable steps are dropped.
//! 3.  **Derive New Versions**: [`FlowGraph::upsert_step`],
//!     [`FlowGraph::remove_step_at`] and [`FlowGraph::copy_with`] return new graphs
//!     and never alter the receiver.
//! 4.  **Persist**: [`FlowGraph::to_json`] emits a canonical, order-stable payload
//!     and [`FlowGraph::from_json`] reads one back leniently, without ever failing.
//!
//! ## Quick Start
//!
//! ```rust
//! use flowgraph::prelude::*;
//!
//! let graph = FlowGraph::builder("Auth")
//!     .description("login flow")
//!     .step(
//!         FlowStep::builder(10)
//!             .title("Check password")
//!             .failure_code("BAD_PASSWORD")
//!             .on_success(Target::Step(11))
//!             .on_failure(Target::End)
//!             .build(),
//!     )
//!     .step(FlowStep::builder(11).title("Issue token").build())
//!     .build();
//!
//! assert_eq!(graph.entry_index(), Target::Step(10));
//! assert_eq!(graph.step_at(10).map(|s| s.on_success()), Some(Target::Step(11)));
//!
//! let restored = FlowGraph::from_json(&graph.to_json());
//! assert_eq!(restored, graph);
//! ```
//!
//! Walking the graph and checking that every target resolves are left to the
//! caller.

pub mod error;
pub mod graph;
pub mod prelude;
pub mod step;
pub mod value;

pub use error::FlowGraphError;
pub use graph::{FlowGraph, FlowGraphBuilder, GraphChanges, StepMap};
pub use step::{FlowStep, FlowStepBuilder, StepIndex, Target};
