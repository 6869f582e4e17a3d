use crate::classify::node_status;
use crate::errors::UnrecognizedStatusError;
use crate::stages::aggregate_stages;
use crate::status::{RunStatus, resolve_run_status};
use crate::walk::walk_graph;
use gantry_flow::{ExecutionNode, RunSource};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Derived view of a single execution node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: String,
    pub name: String,
    pub status: RunStatus,
    pub start_time_millis: u64,
    pub duration_millis: u64,
    pub pause_duration_millis: u64,
    pub parent_node_ids: Vec<String>,
}

impl NodeSummary {
    pub fn from_node(node: &ExecutionNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            status: node_status(node),
            start_time_millis: node.start_time_millis.unwrap_or(0),
            duration_millis: node.duration_millis,
            pause_duration_millis: node.pause_millis,
            parent_node_ids: node.parent_ids.clone(),
        }
    }

    /// True once execution has reached the node. Link layers gate per-node
    /// links (logs, console output) on this.
    pub fn executed(&self) -> bool {
        self.status != RunStatus::NotExecuted
    }
}

/// One logical stage of a run. `pause_duration_millis` is the accumulated
/// pause of the steps inside the stage, as measured by the engine on the
/// stage marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageSummary {
    pub id: String,
    pub name: String,
    pub status: RunStatus,
    pub start_time_millis: u64,
    pub duration_millis: u64,
    pub pause_duration_millis: u64,
}

impl StageSummary {
    pub fn from_node(node: &ExecutionNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            status: node_status(node),
            start_time_millis: node.start_time_millis.unwrap_or(0),
            duration_millis: node.duration_millis,
            pause_duration_millis: node.pause_millis,
        }
    }

    pub fn executed(&self) -> bool {
        self.status != RunStatus::NotExecuted
    }
}

/// Top-level derived view of one run observation.
///
/// `stages` is chronological by start time. Rebuilt from scratch on every
/// observation; holds no reference back into engine state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: String,
    pub name: String,
    pub status: RunStatus,
    pub start_time_millis: u64,
    pub end_time_millis: u64,
    pub duration_millis: u64,
    pub queue_duration_millis: u64,
    pub pause_duration_millis: u64,
    pub stages: Vec<StageSummary>,
}

/// Summarizes a run against the system clock.
pub fn summarize<S: RunSource>(source: &S) -> Result<RunSummary, UnrecognizedStatusError> {
    summarize_at(source, clock_millis())
}

/// Summarizes a run at an explicit observation time.
///
/// The observation time is the end-time stand-in for runs still moving
/// (in progress or paused on input). An empty-stage run measures its queue
/// delay against it even when terminal.
pub fn summarize_at<S: RunSource>(
    source: &S,
    observed_at_millis: u64,
) -> Result<RunSummary, UnrecognizedStatusError> {
    let Some(execution) = source.execution() else {
        return Ok(RunSummary {
            id: source.run_id().to_string(),
            name: source.display_name().to_string(),
            status: RunStatus::NotExecuted,
            start_time_millis: source.start_time_millis(),
            end_time_millis: 0,
            duration_millis: 0,
            queue_duration_millis: 0,
            pause_duration_millis: 0,
            stages: Vec::new(),
        });
    };

    let status = resolve_run_status(
        true,
        execution.complete,
        execution.failure_cause.as_deref(),
        execution.pending_input_active,
    )?;

    let outcome = walk_graph(&execution.graph);
    let mut stages = aggregate_stages(outcome.raw_stages);

    let start_time_millis = source.start_time_millis();
    let end_time_millis = if status.is_terminal() {
        outcome.latest_timestamp_millis
    } else {
        observed_at_millis
    };

    // Queue delay is read before the run status lands on the last stage, so
    // a stage that never started cannot pass for executed here.
    let queue_duration_millis = if stages.is_empty() {
        observed_at_millis.saturating_sub(start_time_millis)
    } else {
        stages
            .iter()
            .find(|stage| stage.executed())
            .map(|stage| stage.start_time_millis.saturating_sub(start_time_millis))
            .unwrap_or(0)
    };

    if let Some(last) = stages.last_mut() {
        last.status = status;
    }

    let duration_millis = end_time_millis
        .saturating_sub(start_time_millis)
        .saturating_sub(queue_duration_millis);
    let pause_duration_millis = stages
        .iter()
        .map(|stage| stage.pause_duration_millis)
        .sum();

    Ok(RunSummary {
        id: source.run_id().to_string(),
        name: source.display_name().to_string(),
        status,
        start_time_millis,
        end_time_millis,
        duration_millis,
        queue_duration_millis,
        pause_duration_millis,
        stages,
    })
}

fn clock_millis() -> u64 {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    since_epoch.as_millis() as u64
}
