//! Prelude module for convenient imports
//!
//! Re-exports the types needed to build, derive and serialize flow graphs.
//!
//! # Example
//!
//! ```rust
//! use flowgraph::prelude::*;
//!
//! let graph = FlowGraph::from_steps("Empty", "", Vec::<FlowStep>::new());
//! assert_eq!(graph.entry_index_wire(), -1);
//! ```

// Graph and step model
pub use crate::graph::{FlowGraph, FlowGraphBuilder, GraphChanges, StepMap};
pub use crate::step::{FlowStep, FlowStepBuilder, StepIndex, TERMINAL_WIRE, Target};

// Error types
pub use crate::error::FlowGraphError;

// Map type used for raw step replacements
pub use ahash::AHashMap;
