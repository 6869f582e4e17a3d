use thiserror::Error;

/// The engine reported a terminal failure cause the status model does not
/// recognize. Summarization fails whole; no partial summary is produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unrecognized failure cause '{cause}'")]
pub struct UnrecognizedStatusError {
    pub cause: String,
}

impl UnrecognizedStatusError {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}
