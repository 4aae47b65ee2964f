//! Input validation in front of the network probe

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{is_valid_domain, TestKind};
use crate::error::DomainError;
use crate::probes::NetworkProbe;

pub struct NetworkTestService {
    probe: Arc<dyn NetworkProbe>,
}

impl NetworkTestService {
    pub fn new(probe: Arc<dyn NetworkProbe>) -> Self {
        Self { probe }
    }

    /// Validate `domain` and `kind`, then run the probe and return its raw output.
    pub async fn run(&self, domain: &str, kind: &str) -> Result<String, DomainError> {
        let domain = domain.trim();
        if !is_valid_domain(domain) {
            warn!("Rejected network test for invalid domain: {:?}", domain);
            return Err(DomainError::InvalidDomain(domain.to_string()));
        }
        let kind = TestKind::parse(kind).ok_or_else(|| DomainError::InvalidTestKind(kind.to_string()))?;

        info!("Running {} against {}", kind, domain);
        self.probe.run(kind, domain).await
    }
}
