use crate::status::{FailureCause, RunStatus};
use gantry_flow::{ExecutionNode, NodeKind};

/// Per-node facts read once per walk visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeClassification {
    pub stage_start: bool,
    pub branch_start: bool,
    pub branch_end: bool,
    pub start_time_millis: Option<u64>,
    pub pause_millis: u64,
}

/// Extracts the walk-relevant facts from one node. Stage and branch markers
/// come from the engine's own kind assignment; nothing here re-derives them.
pub fn classify(node: &ExecutionNode) -> NodeClassification {
    NodeClassification {
        stage_start: node.kind == NodeKind::StageStart,
        branch_start: node.kind == NodeKind::BranchStart,
        branch_end: node.kind == NodeKind::BranchEnd,
        start_time_millis: node.start_time_millis,
        pause_millis: node.pause_millis,
    }
}

/// Node-level status. A node with no recorded start time has not executed;
/// an executed node is `FAILED` when the engine recorded an error on it and
/// `SUCCESS` otherwise. The in-flight states never apply at node level; the
/// chronologically last stage picks the run's own status up separately.
pub fn node_status(node: &ExecutionNode) -> RunStatus {
    if !node.started() {
        RunStatus::NotExecuted
    } else if node.error.is_some() {
        RunStatus::Failure(FailureCause::Failed)
    } else {
        RunStatus::Success
    }
}
