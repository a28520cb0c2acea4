// Background polling tasks feeding the dashboard (same cadence model as the
// backend's web panel: status every 5s, containers every 10s, independent).

use crate::api::{ApiClient, ApiError};
use crate::models::{ContainerAction, ContainerListResponse, ContainerSummary, SystemStatus};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Duration, interval};

/// What the container pane currently shows. Transport failures keep the
/// previous value; a structured backend error replaces it with a message row.
#[derive(Debug, Clone)]
pub enum ContainerListView {
    /// No response received yet.
    Loading,
    Loaded(Vec<ContainerSummary>),
    /// Backend answered with an {error} descriptor; rendered inline.
    Failed(String),
}

/// A user-initiated lifecycle action, already confirmed where required.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub container_id: String,
    pub action: ContainerAction,
}

pub struct StatusPollerDeps {
    pub api: Arc<ApiClient>,
    pub tx: watch::Sender<Option<SystemStatus>>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct ContainerPollerDeps {
    pub api: Arc<ApiClient>,
    pub tx: watch::Sender<ContainerListView>,
    /// Completed actions push here to force an immediate re-fetch.
    pub refresh_rx: mpsc::Receiver<()>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct ActionWorkerDeps {
    pub api: Arc<ApiClient>,
    pub request_rx: mpsc::Receiver<ActionRequest>,
    pub refresh_tx: mpsc::Sender<()>,
    /// User-facing alerts (blocking modal on the UI side).
    pub alert_tx: mpsc::Sender<String>,
}

/// Spawns the system-status poller. The first tick fires immediately (the
/// initial fetch); failures are logged and the previous snapshot is retained.
pub fn spawn_status_poller(deps: StatusPollerDeps, interval_secs: u64) -> tokio::task::JoinHandle<()> {
    let StatusPollerDeps {
        api,
        tx,
        mut shutdown_rx,
    } = deps;
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match api.system_status().await {
                        Ok(status) => {
                            tx.send_replace(Some(status));
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "system_status",
                                "system status fetch failed"
                            );
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Status poller shutting down");
                    break;
                }
            }
        }
    })
}

/// Spawns the container-list poller. Re-fetches on its own cadence and
/// whenever a refresh signal arrives (after a completed action).
pub fn spawn_container_poller(
    deps: ContainerPollerDeps,
    interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    let ContainerPollerDeps {
        api,
        tx,
        mut refresh_rx,
        mut shutdown_rx,
    } = deps;
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // A closed channel resolves recv() immediately, so once the last
        // refresh sender is gone the branch must be disabled or the loop
        // would spin between ticks.
        let mut refresh_open = true;
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Some(view) = fetch_container_view(&api).await {
                        tx.send_replace(view);
                    }
                }
                signal = refresh_rx.recv(), if refresh_open => {
                    match signal {
                        Some(()) => {
                            if let Some(view) = fetch_container_view(&api).await {
                                tx.send_replace(view);
                            }
                        }
                        // All refresh senders dropped; timer keeps running.
                        None => refresh_open = false,
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Container poller shutting down");
                    break;
                }
            }
        }
    })
}

/// One list fetch. None means "keep whatever is displayed" (transport or
/// plain HTTP failure).
async fn fetch_container_view(api: &ApiClient) -> Option<ContainerListView> {
    match api.list_containers().await {
        Ok(ContainerListResponse::Containers(containers)) => {
            Some(ContainerListView::Loaded(containers))
        }
        Ok(ContainerListResponse::Error { error }) => {
            tracing::warn!(
                error = %error,
                operation = "list_containers",
                "backend reported a container listing error"
            );
            Some(ContainerListView::Failed(error))
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                operation = "list_containers",
                "container list fetch failed"
            );
            None
        }
    }
}

/// Spawns the action worker: POSTs lifecycle actions, logs the backend's
/// confirmation and triggers a list refresh on success, surfaces errors as
/// alerts. Exits when the request channel closes.
pub fn spawn_action_worker(deps: ActionWorkerDeps) -> tokio::task::JoinHandle<()> {
    let ActionWorkerDeps {
        api,
        mut request_rx,
        refresh_tx,
        alert_tx,
    } = deps;
    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            match api
                .container_action(&request.container_id, request.action)
                .await
            {
                Ok(message) => {
                    tracing::info!(
                        operation = "container_action",
                        action = %request.action,
                        container_id = %request.container_id,
                        message = %message,
                        "container action succeeded"
                    );
                    if refresh_tx.try_send(()).is_err() {
                        tracing::debug!("Refresh channel full or closed; next tick will catch up");
                    }
                }
                Err(ApiError::Backend { message, .. }) => {
                    let _ = alert_tx.send(format!("Error: {message}")).await;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        operation = "container_action",
                        action = %request.action,
                        container_id = %request.container_id,
                        "container action failed"
                    );
                    let _ = alert_tx
                        .send("Could not reach the backend while performing the action.".to_string())
                        .await;
                }
            }
        }
        tracing::debug!("Action worker shutting down");
    })
}
