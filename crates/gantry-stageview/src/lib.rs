//! Derives presentable run summaries from pipeline execution graphs: one
//! walk over an immutable snapshot yields the run status, the chronological
//! stage list, and the queue/pause/wall-clock timing figures.

pub mod classify;
pub mod errors;
pub mod stages;
pub mod status;
pub mod summary;
pub mod walk;

pub use classify::{NodeClassification, classify, node_status};
pub use errors::UnrecognizedStatusError;
pub use stages::aggregate_stages;
pub use status::{FailureCause, RunStatus, resolve_run_status};
pub use summary::{NodeSummary, RunSummary, StageSummary, summarize, summarize_at};
pub use walk::{WalkOutcome, walk_graph};
