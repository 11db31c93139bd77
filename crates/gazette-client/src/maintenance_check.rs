//! Best-effort maintenance check performed when a page mounts.
//!
//! Issues a single request to the gate endpoint and reports whether the
//! visitor should be sent to the maintenance page. Failures fail open: the
//! visitor stays where they are. A cancellation token tied to the caller's
//! lifetime is honoured both while the request is in flight and after it
//! resolves, so a late answer never triggers a redirect.

use std::time::Duration;

use gazette_core::error::AppError;
use gazette_core::session::SESSION_COOKIE_NAME;
use reqwest::Client;
use reqwest::header::COOKIE;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Static page visitors are sent to while maintenance is on.
pub const MAINTENANCE_PAGE: &str = "/maintenance";

const GATE_PATH: &str = "/api/maintenance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Navigate to the given path.
    Redirect(String),
    /// Nothing to do (maintenance off, admin visitor, or the check failed).
    Stay,
    /// The caller went away before the check completed.
    Cancelled,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GateResponse {
    should_redirect: bool,
}

/// One-shot client for `GET /api/maintenance`.
#[derive(Clone)]
pub struct MaintenanceProbe {
    client: Client,
    gate_url: Url,
    session: Option<String>,
}

impl MaintenanceProbe {
    /// `site_url` is the origin serving the gate endpoint, e.g. `https://news.example.com`.
    pub fn new(site_url: &str) -> Result<Self, AppError> {
        let gate_url = Url::parse(site_url)
            .and_then(|base| base.join(GATE_PATH))
            .map_err(|e| AppError::ConfigError(format!("Invalid site URL '{site_url}': {e}")))?;

        let client = Client::builder()
            .user_agent("Gazette/0.1")
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            gate_url,
            session: None,
        })
    }

    /// Send the given session token as the `admin_session` cookie.
    pub fn with_session(mut self, token: impl Into<String>) -> Self {
        self.session = Some(token.into());
        self
    }

    /// Run the check once.
    pub async fn check(&self, cancel: &CancellationToken) -> CheckOutcome {
        let result = tokio::select! {
            () = cancel.cancelled() => return CheckOutcome::Cancelled,
            result = self.fetch() => result,
        };

        if cancel.is_cancelled() {
            return CheckOutcome::Cancelled;
        }

        match result {
            Ok(gate) if gate.should_redirect => {
                CheckOutcome::Redirect(MAINTENANCE_PAGE.to_string())
            }
            Ok(_) => CheckOutcome::Stay,
            Err(e) => {
                tracing::warn!(error = %e, "Maintenance check failed");
                CheckOutcome::Stay
            }
        }
    }

    async fn fetch(&self) -> Result<GateResponse, AppError> {
        let mut request = self.client.get(self.gate_url.clone());
        if let Some(token) = &self.session {
            request = request.header(COOKIE, format!("{SESSION_COOKIE_NAME}={token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                self.gate_url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))?;
        Ok(serde_json::from_slice(&body)?)
    }
}
