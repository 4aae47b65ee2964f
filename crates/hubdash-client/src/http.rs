//! HTTP transport for the dashboard API
//!
//! The client keeps the `hubdash.sid` session cookie handed out by
//! `/api/login` and sends it with every later request. Clones share it.

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use hubdash_core::domain::{ClientErrorReport, NetworkTestRequest};
use hubdash_shared::constants::{CLIENT_ERROR_REPORT_TIMEOUT_SECS, SESSION_COOKIE_NAME};

use crate::error::ClientError;
use crate::nav_menu::MenuSource;
use crate::network_panel::NetworkTestTransport;
use crate::reporter::ErrorSink;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionInfo {
    pub username: String,
    pub role: String,
}

/// Body of the login, logout, and session-check responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<SessionInfo>,
}

#[derive(Clone)]
pub struct DashboardClient {
    client: Client,
    base_url: String,
    session: Arc<RwLock<Option<String>>>,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: Arc::new(RwLock::new(None)),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.session.read().as_deref() {
            Some(token) => builder.header(header::COOKIE, format!("{SESSION_COOKIE_NAME}={token}")),
            None => builder,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.read().is_some()
    }

    /// `POST /api/login`; on success the session cookie is kept for later calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionStatus, ClientError> {
        let response = self
            .request(Method::POST, "/api/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let token = session_cookie(&response).ok_or_else(|| {
            ClientError::Decode("login response carried no session cookie".to_string())
        })?;
        *self.session.write() = Some(token);
        info!("Logged in as {}", username);

        response
            .json::<SessionStatus>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `POST /api/logout`. The local cookie is dropped even if the call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.request(Method::POST, "/api/logout").send().await;
        *self.session.write() = None;
        ensure_success(result?).await?;
        Ok(())
    }

    pub async fn check_session(&self) -> Result<SessionStatus, ClientError> {
        let response = self.request(Method::GET, "/api/check-session").send().await?;
        ensure_success(response)
            .await?
            .json::<SessionStatus>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `GET /api/config` as untyped JSON; the menu loader tolerates odd shapes.
    pub async fn fetch_config(&self) -> Result<Value, ClientError> {
        let response = self.request(Method::GET, "/api/config").send().await?;
        let response = ensure_success(response).await?;
        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `POST /api/client-error`, abandoned once `timeout` elapses.
    pub async fn send_client_error(
        &self,
        report: &ClientErrorReport,
        timeout: Duration,
    ) -> Result<(), ClientError> {
        let response = self
            .request(Method::POST, "/api/client-error")
            .timeout(timeout)
            .json(report)
            .send()
            .await
            .map_err(timeout_aware)?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn network_test(&self, request: &NetworkTestRequest) -> Result<String, ClientError> {
        let response = self
            .request(Method::POST, "/api/network-test")
            .json(request)
            .send()
            .await
            .map_err(timeout_aware)?;
        let response = ensure_success(response).await?;
        response.text().await.map_err(timeout_aware)
    }
}

fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| value.split(';').next())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn timeout_aware(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(e)
    }
}

/// Turn a non-2xx response into [`ClientError::Status`].
///
/// The message is the `message` or `error` field of a JSON body, else the raw
/// body, else the status reason.
async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|json| {
            ["message", "error"]
                .iter()
                .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .or_else(|| (!body.trim().is_empty()).then(|| body.clone()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl MenuSource for DashboardClient {
    async fn fetch_menu_config(&self) -> Result<Value, ClientError> {
        self.fetch_config().await
    }
}

#[async_trait]
impl NetworkTestTransport for DashboardClient {
    async fn run_test(&self, request: &NetworkTestRequest) -> Result<String, ClientError> {
        self.network_test(request).await
    }
}

/// Posts reports to `/api/client-error`; delivery failures are dropped.
/// Each send is abandoned after `timeout`.
#[derive(Clone)]
pub struct HttpErrorSink {
    client: DashboardClient,
    timeout: Duration,
}

impl HttpErrorSink {
    pub fn new(client: DashboardClient) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(CLIENT_ERROR_REPORT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ErrorSink for HttpErrorSink {
    async fn deliver(&self, report: &ClientErrorReport) {
        // Not routed through a forwarding logger, which would report again.
        if let Err(e) = self.client.send_client_error(report, self.timeout).await {
            debug!("Client error report not delivered: {}", e);
        }
    }
}
