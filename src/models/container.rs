// Container inventory and lifecycle-action models

use serde::{Deserialize, Serialize};

/// One container as reported by GET /api/containers. Backend ordering is
/// preserved; there is no client-side sort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub id: String,
    pub name: String,
    pub image: String,
    /// Full status text, e.g. "running" or "exited (0)".
    pub status: String,
}

impl ContainerSummary {
    pub fn state(&self) -> ContainerState {
        ContainerState::from_status(&self.status)
    }
}

/// Coarse container state used to pick the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Running,
    Exited,
    Paused,
    Restarting,
    #[serde(other)]
    Unknown,
}

impl ContainerState {
    /// Derive from the lowercased first whitespace-delimited token of the
    /// status string (e.g. "exited (0)" -> Exited).
    pub fn from_status(status: &str) -> Self {
        let token = status.split_whitespace().next().unwrap_or_default();
        match token.to_lowercase().as_str() {
            "running" => ContainerState::Running,
            "exited" => ContainerState::Exited,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            _ => ContainerState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerState::Running => "running",
            ContainerState::Exited => "exited",
            ContainerState::Paused => "paused",
            ContainerState::Restarting => "restarting",
            ContainerState::Unknown => "unknown",
        }
    }
}

/// GET /api/containers returns either the list or an error descriptor; the
/// shape must be discriminated before use.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ContainerListResponse {
    Error { error: String },
    Containers(Vec<ContainerSummary>),
}

/// Lifecycle action dispatched via POST /api/containers/{id}/{action}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
    Remove,
}

impl ContainerAction {
    /// URL path segment for the action endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerAction::Start => "start",
            ContainerAction::Stop => "stop",
            ContainerAction::Restart => "restart",
            ContainerAction::Remove => "remove",
        }
    }

    /// Remove is irreversible and requires interactive confirmation.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, ContainerAction::Remove)
    }
}

impl std::fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 2xx body of an action endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionSuccess {
    pub message: String,
}

/// Structured error body, returned by action endpoints on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    pub error: String,
}
