use crate::errors::UnrecognizedStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal failure causes a pipeline engine can report for a run.
///
/// The engine hands these over as bare identifier strings; the mapping in
/// [`FailureCause::from_cause`] is the only way in, and it rejects anything
/// outside this set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureCause {
    Failed,
    Aborted,
    Unstable,
    NotBuilt,
}

impl FailureCause {
    pub fn from_cause(cause: &str) -> Result<Self, UnrecognizedStatusError> {
        match cause {
            "FAILED" => Ok(Self::Failed),
            "ABORTED" => Ok(Self::Aborted),
            "UNSTABLE" => Ok(Self::Unstable),
            "NOT_BUILT" => Ok(Self::NotBuilt),
            other => Err(UnrecognizedStatusError::new(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Failed => "FAILED",
            Self::Aborted => "ABORTED",
            Self::Unstable => "UNSTABLE",
            Self::NotBuilt => "NOT_BUILT",
        }
    }
}

/// Status of a run, stage, or node; one uniform set for all three levels.
///
/// The non-failure states are closed; failure states are all carried by the
/// `Failure` variant so a new engine cause touches only [`FailureCause`].
/// On the wire a status is one flat uppercase name (`"SUCCESS"`,
/// `"PAUSED_PENDING_INPUT"`, `"ABORTED"`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
    NotExecuted,
    InProgress,
    PausedPendingInput,
    Success,
    Failure(FailureCause),
}

impl RunStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotExecuted => "NOT_EXECUTED",
            Self::InProgress => "IN_PROGRESS",
            Self::PausedPendingInput => "PAUSED_PENDING_INPUT",
            Self::Success => "SUCCESS",
            Self::Failure(cause) => cause.as_str(),
        }
    }

    /// True once the run can no longer change state on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failure(_))
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunStatus {
    type Err = UnrecognizedStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "NOT_EXECUTED" => Ok(Self::NotExecuted),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "PAUSED_PENDING_INPUT" => Ok(Self::PausedPendingInput),
            "SUCCESS" => Ok(Self::Success),
            other => FailureCause::from_cause(other).map(Self::Failure),
        }
    }
}

impl Serialize for RunStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Maps run-level engine facts to a status, first match wins: never executed,
/// then a reported failure cause, then clean completion, then an outstanding
/// human-input step, and `IN_PROGRESS` as the remainder.
pub fn resolve_run_status(
    has_execution: bool,
    complete: bool,
    failure_cause: Option<&str>,
    pending_input_active: bool,
) -> Result<RunStatus, UnrecognizedStatusError> {
    if !has_execution {
        return Ok(RunStatus::NotExecuted);
    }
    if let Some(cause) = failure_cause {
        return Ok(RunStatus::Failure(FailureCause::from_cause(cause)?));
    }
    if complete {
        return Ok(RunStatus::Success);
    }
    if pending_input_active {
        return Ok(RunStatus::PausedPendingInput);
    }
    Ok(RunStatus::InProgress)
}
