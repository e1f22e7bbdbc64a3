use serde::Serialize;

/// Result of a controller action, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// Completed; controller state is updated.
    Done,
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
    /// Rejected before any request.
    Invalid(String),
    /// The request failed.
    Failed(String),
    /// The screen was unmounted before the answer arrived.
    Discarded,
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Invalid(message) | Outcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}
