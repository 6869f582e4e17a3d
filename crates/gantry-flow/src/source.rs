use crate::graph::ExecutionGraph;
use serde::{Deserialize, Serialize};

/// Engine facts about a run that has started executing.
///
/// `failure_cause` is the engine's terminal cause identifier, reported only
/// when the run ended abnormally. `has_changes` and `has_artifacts` exist for
/// link layers deciding which related-resource links to expose; nothing in
/// the summary math reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExecutionState {
    pub complete: bool,
    pub failure_cause: Option<String>,
    pub pending_input_active: bool,
    pub has_changes: bool,
    pub has_artifacts: bool,
    pub graph: ExecutionGraph,
}

/// Read side of a pipeline engine, one run at a time.
///
/// Implementations must answer from a coherent observation: the graph and
/// the run-level facts describe the same instant. Live adapters typically
/// capture both under the engine's own snapshot mechanism;
/// [`RecordedRun`](crate::memory::RecordedRun) is the in-memory form.
pub trait RunSource {
    fn run_id(&self) -> &str;

    fn display_name(&self) -> &str;

    fn start_time_millis(&self) -> u64;

    /// `None` until the engine has started executing the run.
    fn execution(&self) -> Option<&ExecutionState>;

    /// True iff at least one human-input step is outstanding right now.
    fn is_pending_input(&self) -> bool {
        self.execution()
            .is_some_and(|execution| execution.pending_input_active)
    }
}
