use std::fmt;

/// Outcome of a repository mutation.
///
/// Expected domain failures (missing entity, duplicate id, unknown id) are
/// reported here rather than as errors. Dropping a result loses the failure.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Success,
    Failure(Option<String>),
}

impl OperationResult {
    pub fn ok() -> Self {
        OperationResult::Success
    }

    pub fn fail(message: impl Into<String>) -> Self {
        OperationResult::Failure(Some(message.into()))
    }

    /// A failure with no explanation attached.
    pub fn fail_silent() -> Self {
        OperationResult::Failure(None)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            OperationResult::Success => None,
            OperationResult::Failure(message) => message.as_deref(),
        }
    }
}

impl From<OperationResult> for bool {
    fn from(result: OperationResult) -> Self {
        result.is_success()
    }
}

impl From<&OperationResult> for bool {
    fn from(result: &OperationResult) -> Self {
        result.is_success()
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationResult::Success => write!(f, "ok"),
            OperationResult::Failure(Some(message)) => write!(f, "failed: {}", message),
            OperationResult::Failure(None) => write!(f, "failed"),
        }
    }
}
