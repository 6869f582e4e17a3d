//! Engine-facing side of the Gantry run summarizer: the immutable execution
//! graph snapshot, the `RunSource` seam a pipeline engine implements, and an
//! in-memory recorded form of a run observation.

pub mod graph;
pub mod memory;
pub mod node;
pub mod source;

pub use graph::{ExecutionGraph, FlowGraphError, GraphBuilder, Walk};
pub use memory::{RecordedRun, RecordedRunBuilder};
pub use node::{ExecutionNode, NodeId, NodeKind};
pub use source::{ExecutionState, RunSource};
