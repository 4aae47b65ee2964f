//! Liveness and host diagnostics

use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

use crate::domain::{LivenessReport, ProcessInfo, SystemReport};
use crate::error::DomainError;
use crate::probes::SystemProbe;

pub struct HealthService {
    probe: Arc<dyn SystemProbe>,
    started_at: Instant,
    version: String,
    env: String,
}

impl HealthService {
    pub fn new(probe: Arc<dyn SystemProbe>, version: impl Into<String>, env: impl Into<String>) -> Self {
        Self {
            probe,
            started_at: Instant::now(),
            version: version.into(),
            env: env.into(),
        }
    }

    pub fn uptime_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    pub fn liveness(&self) -> LivenessReport {
        LivenessReport {
            status: "ok",
            uptime: self.uptime_seconds(),
            timestamp: Utc::now().timestamp_millis(),
            version: self.version.clone(),
        }
    }

    pub async fn system_report(&self) -> Result<SystemReport, DomainError> {
        let snapshot = self.probe.collect().await.map_err(|e| {
            error!("Failed to collect system information: {}", e);
            e
        })?;

        Ok(SystemReport {
            status: "ok",
            system: snapshot.system,
            process: ProcessInfo {
                pid: std::process::id(),
                uptime: self.uptime_seconds(),
                memory_usage: snapshot.process_memory,
                runtime_version: format!("hubdash {}", self.version),
                env: self.env.clone(),
            },
        })
    }
}
