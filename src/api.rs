// HTTP client for the backend dashboard API

use crate::config::BackendConfig;
use crate::models::{
    ActionSuccess, BackendErrorBody, ContainerAction, ContainerListResponse, SystemStatus,
};
use reqwest::StatusCode;
use std::time::Duration;

/// Errors from the backend API, split the way the UI reacts to them:
/// transport and plain HTTP failures are logged only, structured backend
/// errors are surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connect, timeout, protocol).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response without a usable error body.
    #[error("backend returned HTTP {status}")]
    Status { status: StatusCode },
    /// Non-2xx response carrying a structured {error} payload.
    #[error("backend error (HTTP {status}): {message}")]
    Backend { status: StatusCode, message: String },
    /// 2xx response whose body did not parse.
    #[error("could not decode response body: {0}")]
    Decode(#[source] reqwest::Error),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET /api/system/status. Any non-2xx response is a failure; callers keep
    /// their previous snapshot.
    pub async fn system_status(&self) -> Result<SystemStatus, ApiError> {
        let url = format!("{}/api/system/status", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status(),
            });
        }
        response.json::<SystemStatus>().await.map_err(ApiError::Decode)
    }

    /// GET /api/containers. A 2xx body is either the container list or an
    /// error descriptor; the caller discriminates.
    pub async fn list_containers(&self) -> Result<ContainerListResponse, ApiError> {
        let url = format!("{}/api/containers", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status(),
            });
        }
        response
            .json::<ContainerListResponse>()
            .await
            .map_err(ApiError::Decode)
    }

    /// POST /api/containers/{id}/{action} with no body. Returns the backend's
    /// confirmation message on success.
    pub async fn container_action(
        &self,
        container_id: &str,
        action: ContainerAction,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/api/containers/{}/{}",
            self.base_url, container_id, action
        );
        let response = self.http.post(&url).send().await?;
        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<ActionSuccess>()
                .await
                .map_err(ApiError::Decode)?;
            return Ok(body.message);
        }
        match response.json::<BackendErrorBody>().await {
            Ok(body) => Err(ApiError::Backend {
                status,
                message: body.error,
            }),
            Err(_) => Err(ApiError::Status { status }),
        }
    }
}
