use serde::{Deserialize, Serialize};

pub type NodeId = String;

/// Role a node plays in the execution graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Step,
    StageStart,
    BranchStart,
    BranchEnd,
}

/// One node of a run's execution graph, as recorded by the engine.
///
/// `start_time_millis` stays `None` until execution reaches the node;
/// `duration_millis` and `pause_millis` stay zero until the engine has
/// measured them. Whether a node marks a stage boundary or a parallel
/// branch is the engine's call, baked into `kind` when the snapshot is
/// taken.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub parent_ids: Vec<NodeId>,
    pub start_time_millis: Option<u64>,
    pub duration_millis: u64,
    pub pause_millis: u64,
    pub error: Option<String>,
}

impl ExecutionNode {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent_ids: Vec::new(),
            start_time_millis: None,
            duration_millis: 0,
            pause_millis: 0,
            error: None,
        }
    }

    pub fn with_parents(mut self, parent_ids: Vec<NodeId>) -> Self {
        self.parent_ids = parent_ids;
        self
    }

    pub fn started_at(mut self, millis: u64) -> Self {
        self.start_time_millis = Some(millis);
        self
    }

    pub fn with_duration(mut self, millis: u64) -> Self {
        self.duration_millis = millis;
        self
    }

    pub fn with_pause(mut self, millis: u64) -> Self {
        self.pause_millis = millis;
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// True once execution has reached the node.
    pub fn started(&self) -> bool {
        self.start_time_millis.is_some()
    }

    pub fn is_stage_start(&self) -> bool {
        self.kind == NodeKind::StageStart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_node_without_timing_expected_not_started() {
        let node = ExecutionNode::new("4", "checkout", NodeKind::Step);

        assert!(!node.started());
        assert_eq!(node.start_time_millis, None);
        assert_eq!(node.duration_millis, 0);
    }

    #[test]
    fn node_round_trip_expected_lossless() {
        let node = ExecutionNode::new("7", "Build", NodeKind::StageStart)
            .with_parents(vec!["4".to_string()])
            .started_at(2000)
            .with_duration(350)
            .with_pause(120);

        let encoded = serde_json::to_string(&node).expect("node should serialize");
        let decoded: ExecutionNode =
            serde_json::from_str(&encoded).expect("node should deserialize");

        assert_eq!(decoded, node);
    }
}
