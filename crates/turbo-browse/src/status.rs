//! Lifecycle of an async resource.

use serde::Serialize;

/// Status of an async resource (a facet list or a result page).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "lowercase")]
pub enum ResourceStatus {
    /// Nothing requested yet, or the owning view was closed.
    #[default]
    Idle,
    /// A request for the current intent is in flight.
    Pending,
    /// The latest request succeeded.
    Settled,
    /// The latest request failed.
    Failed(String),
}

impl ResourceStatus {
    /// Check if a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if the latest request failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short name for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Settled => "settled",
            Self::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(e) => write!(f, "failed: {}", e),
            other => f.write_str(other.name()),
        }
    }
}
