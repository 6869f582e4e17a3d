use crate::graph::ExecutionGraph;
use crate::source::{ExecutionState, RunSource};
use serde::{Deserialize, Serialize};

/// A fully materialized observation of one run.
///
/// Everything a summarizer needs is captured up front, so the value can be
/// serialized, shipped, and replayed later with identical results. Live
/// adapters convert an engine run into one of these (or implement
/// [`RunSource`] directly); tests build them through [`RecordedRun::builder`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedRun {
    pub run_id: String,
    pub display_name: String,
    pub start_time_millis: u64,
    pub execution: Option<ExecutionState>,
}

impl RecordedRun {
    pub fn builder(run_id: impl Into<String>, display_name: impl Into<String>) -> RecordedRunBuilder {
        RecordedRunBuilder {
            run_id: run_id.into(),
            display_name: display_name.into(),
            start_time_millis: 0,
            complete: false,
            failure_cause: None,
            pending_input_active: false,
            has_changes: false,
            has_artifacts: false,
            graph: None,
        }
    }
}

impl RunSource for RecordedRun {
    fn run_id(&self) -> &str {
        &self.run_id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn start_time_millis(&self) -> u64 {
        self.start_time_millis
    }

    fn execution(&self) -> Option<&ExecutionState> {
        self.execution.as_ref()
    }
}

/// Builds a [`RecordedRun`]. A run without a graph has never started
/// executing; every execution-level flag is ignored until `graph` is set.
#[derive(Debug)]
pub struct RecordedRunBuilder {
    run_id: String,
    display_name: String,
    start_time_millis: u64,
    complete: bool,
    failure_cause: Option<String>,
    pending_input_active: bool,
    has_changes: bool,
    has_artifacts: bool,
    graph: Option<ExecutionGraph>,
}

impl RecordedRunBuilder {
    pub fn started_at(mut self, millis: u64) -> Self {
        self.start_time_millis = millis;
        self
    }

    pub fn graph(mut self, graph: ExecutionGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn complete(mut self) -> Self {
        self.complete = true;
        self
    }

    pub fn failure_cause(mut self, cause: impl Into<String>) -> Self {
        self.failure_cause = Some(cause.into());
        self
    }

    pub fn pending_input(mut self) -> Self {
        self.pending_input_active = true;
        self
    }

    pub fn with_changes(mut self) -> Self {
        self.has_changes = true;
        self
    }

    pub fn with_artifacts(mut self) -> Self {
        self.has_artifacts = true;
        self
    }

    pub fn build(self) -> RecordedRun {
        let execution = self.graph.map(|graph| ExecutionState {
            complete: self.complete,
            failure_cause: self.failure_cause,
            pending_input_active: self.pending_input_active,
            has_changes: self.has_changes,
            has_artifacts: self.has_artifacts,
            graph,
        });
        RecordedRun {
            run_id: self.run_id,
            display_name: self.display_name,
            start_time_millis: self.start_time_millis,
            execution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ExecutionNode, NodeKind};

    #[test]
    fn build_without_graph_expected_no_execution() {
        let run = RecordedRun::builder("12", "#12")
            .started_at(1000)
            .complete()
            .build();

        assert!(run.execution.is_none());
        assert_eq!(run.start_time_millis(), 1000);
    }

    #[test]
    fn build_with_graph_expected_execution_facts_kept() {
        let graph = ExecutionGraph::builder()
            .node(ExecutionNode::new("2", "start", NodeKind::Step).started_at(1100))
            .build()
            .expect("graph should build");

        let run = RecordedRun::builder("12", "#12")
            .started_at(1000)
            .graph(graph)
            .failure_cause("ABORTED")
            .with_artifacts()
            .build();

        let execution = run.execution().expect("execution should be present");
        assert_eq!(execution.failure_cause.as_deref(), Some("ABORTED"));
        assert!(execution.has_artifacts);
        assert!(!execution.has_changes);
    }

    #[test]
    fn recorded_run_round_trip_expected_lossless() {
        let graph = ExecutionGraph::builder()
            .node(ExecutionNode::new("2", "Build", NodeKind::StageStart).started_at(1500))
            .build()
            .expect("graph should build");
        let run = RecordedRun::builder("12", "#12")
            .started_at(1000)
            .graph(graph)
            .complete()
            .build();

        let encoded = serde_json::to_string(&run).expect("run should serialize");
        let decoded: RecordedRun = serde_json::from_str(&encoded).expect("run should deserialize");

        assert_eq!(decoded, run);
    }
}
