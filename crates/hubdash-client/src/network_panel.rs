//! Network-test panel
//!
//! Collects a target domain and a test kind, posts them to
//! `/api/network-test`, and keeps the last result for display.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};

use hubdash_core::domain::{NetworkTestRequest, TestKind, KNOWN_DOMAINS};
use hubdash_shared::constants::NETWORK_TEST_CLIENT_TIMEOUT_SECS;

use crate::error::ClientError;
use crate::render::Renderer;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkTestTransport: Send + Sync {
    async fn run_test(&self, request: &NetworkTestRequest) -> Result<String, ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DomainChoice {
    #[default]
    Unselected,
    Preset(String),
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelResult {
    Idle,
    Running,
    Output(String),
    TimedOut,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Input was incomplete; carries the alert shown to the user. No request was sent.
    Rejected(String),
    Completed(PanelResult),
}

pub struct NetworkTestPanel<T> {
    transport: T,
    domain: DomainChoice,
    kind: Option<TestKind>,
    timeout: Duration,
    result: PanelResult,
}

impl<T: NetworkTestTransport> NetworkTestPanel<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            domain: DomainChoice::Unselected,
            kind: Some(TestKind::Ping),
            timeout: Duration::from_secs(NETWORK_TEST_CLIENT_TIMEOUT_SECS),
            result: PanelResult::Idle,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn presets() -> &'static [&'static str] {
        KNOWN_DOMAINS
    }

    pub fn select_domain(&mut self, choice: DomainChoice) {
        self.domain = choice;
    }

    pub fn select_kind(&mut self, kind: Option<TestKind>) {
        self.kind = kind;
    }

    pub fn result(&self) -> &PanelResult {
        &self.result
    }

    pub fn clear(&mut self) {
        self.result = PanelResult::Idle;
    }

    fn target(&self) -> Result<String, String> {
        match &self.domain {
            DomainChoice::Custom(domain) if domain.trim().is_empty() => {
                Err("Enter a custom domain to test.".to_string())
            }
            DomainChoice::Custom(domain) => Ok(domain.trim().to_string()),
            DomainChoice::Preset(domain) if !domain.is_empty() => Ok(domain.clone()),
            DomainChoice::Preset(_) | DomainChoice::Unselected => {
                Err("Select a target domain to test.".to_string())
            }
        }
    }

    /// Run one test. A response arriving after the timeout is discarded.
    pub async fn run(&mut self) -> RunOutcome {
        let domain = match self.target() {
            Ok(domain) => domain,
            Err(alert) => {
                warn!("Network test not started: {}", alert);
                return RunOutcome::Rejected(alert);
            }
        };
        let Some(kind) = self.kind else {
            return RunOutcome::Rejected("Select a test type.".to_string());
        };

        info!("Starting {} test against {}", kind, domain);
        self.result = PanelResult::Running;
        let request = NetworkTestRequest { domain, kind };

        let result = match tokio::time::timeout(self.timeout, self.transport.run_test(&request)).await {
            Err(_) | Ok(Err(ClientError::Timeout)) => PanelResult::TimedOut,
            Ok(Ok(output)) => PanelResult::Output(output),
            Ok(Err(ClientError::Status { status, message })) => {
                PanelResult::Failed(format!("Test failed (status {status}): {message}"))
            }
            Ok(Err(e)) => PanelResult::Failed(format!("Test failed: {e}")),
        };

        self.result = result.clone();
        RunOutcome::Completed(result)
    }

    pub fn render_html(&self, renderer: &Renderer) -> Result<String, ClientError> {
        renderer.panel_result(&self.result, self.timeout)
    }
}
