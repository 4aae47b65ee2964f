//! Probe traits (ports) for host diagnostics and network tests

use async_trait::async_trait;

use crate::domain::{HostSnapshot, TestKind};
use crate::error::DomainError;

/// Collects OS and process metrics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemProbe: Send + Sync {
    async fn collect(&self) -> Result<HostSnapshot, DomainError>;
}

/// Runs a connectivity test against a domain and returns its raw text output.
///
/// Implementations enforce their own time bound and report it as
/// [`DomainError::ProbeTimeout`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkProbe: Send + Sync {
    async fn run(&self, kind: TestKind, domain: &str) -> Result<String, DomainError>;
}
