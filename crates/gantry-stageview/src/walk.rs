use crate::classify::classify;
use crate::summary::StageSummary;
use gantry_flow::ExecutionGraph;

/// Everything one pass over the execution graph yields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalkOutcome {
    /// Stage markers in traversal order, duplicates not yet removed.
    pub raw_stages: Vec<StageSummary>,
    /// Most recent start timestamp seen anywhere in the graph; zero when no
    /// node has started.
    pub latest_timestamp_millis: u64,
}

/// Folds a single exactly-once walk of the snapshot into the facts the
/// summarizer needs. Nodes without a start time never raise the latest
/// timestamp; every stage marker materializes one raw [`StageSummary`]
/// carrying the marker's pause contribution.
pub fn walk_graph(graph: &ExecutionGraph) -> WalkOutcome {
    graph.walk().fold(WalkOutcome::default(), |mut outcome, node| {
        let facts = classify(node);
        if let Some(start) = facts.start_time_millis {
            outcome.latest_timestamp_millis = outcome.latest_timestamp_millis.max(start);
        }
        if facts.stage_start {
            outcome.raw_stages.push(StageSummary::from_node(node));
        }
        outcome
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_flow::{ExecutionNode, NodeKind};

    #[test]
    fn walk_graph_expected_latest_timestamp_ignores_unstarted_nodes() {
        let graph = ExecutionGraph::builder()
            .node(ExecutionNode::new("2", "start", NodeKind::Step).started_at(1200))
            .node(
                ExecutionNode::new("3", "sh", NodeKind::Step)
                    .with_parents(vec!["2".to_string()])
                    .started_at(4500),
            )
            .node(ExecutionNode::new("4", "deploy", NodeKind::Step).with_parents(vec!["3".to_string()]))
            .head("4")
            .build()
            .expect("graph should build");

        let outcome = walk_graph(&graph);

        assert_eq!(outcome.latest_timestamp_millis, 4500);
        assert!(outcome.raw_stages.is_empty());
    }

    #[test]
    fn walk_graph_expected_stage_markers_collected_in_traversal_order() {
        let graph = ExecutionGraph::builder()
            .node(ExecutionNode::new("2", "Build", NodeKind::StageStart).started_at(1000))
            .node(
                ExecutionNode::new("5", "Test", NodeKind::StageStart)
                    .with_parents(vec!["2".to_string()])
                    .started_at(2000),
            )
            .node(
                ExecutionNode::new("8", "sh", NodeKind::Step)
                    .with_parents(vec!["5".to_string()])
                    .started_at(2100),
            )
            .head("8")
            .build()
            .expect("graph should build");

        let outcome = walk_graph(&graph);

        let ids: Vec<&str> = outcome
            .raw_stages
            .iter()
            .map(|stage| stage.id.as_str())
            .collect();
        assert_eq!(ids, ["5", "2"]);
    }

    #[test]
    fn walk_graph_with_pause_expected_contribution_on_raw_stage() {
        let graph = ExecutionGraph::builder()
            .node(
                ExecutionNode::new("2", "Approve", NodeKind::StageStart)
                    .started_at(1000)
                    .with_pause(30_000),
            )
            .build()
            .expect("graph should build");

        let outcome = walk_graph(&graph);

        assert_eq!(outcome.raw_stages.len(), 1);
        assert_eq!(outcome.raw_stages[0].pause_duration_millis, 30_000);
    }

    #[test]
    fn walk_graph_empty_expected_zero_outcome() {
        let graph = ExecutionGraph::builder()
            .build()
            .expect("empty graph should build");

        assert_eq!(walk_graph(&graph), WalkOutcome::default());
    }
}
