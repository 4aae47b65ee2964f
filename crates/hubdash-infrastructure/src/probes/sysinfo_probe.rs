//! Host metrics via `sysinfo`

use async_trait::async_trait;
use sysinfo::System;
use tracing::{debug, error};

use hubdash_core::domain::{HostSnapshot, MemoryUsage, SystemInfo};
use hubdash_core::error::DomainError;
use hubdash_core::probes::SystemProbe;

#[derive(Default)]
pub struct SysinfoProbe;

impl SysinfoProbe {
    pub fn new() -> Self {
        Self
    }

    fn snapshot() -> Result<HostSnapshot, DomainError> {
        let sys = System::new_all();

        let pid = sysinfo::get_current_pid()
            .map_err(|e| DomainError::SystemInfoUnavailable(e.to_string()))?;
        let process_memory = sys
            .process(pid)
            .map(|process| MemoryUsage {
                rss: process.memory(),
                virtual_memory: process.virtual_memory(),
            })
            .ok_or_else(|| {
                DomainError::SystemInfoUnavailable(format!("process {pid} not visible"))
            })?;

        let load = System::load_average();
        let system = SystemInfo {
            platform: std::env::consts::OS.to_string(),
            release: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            uptime: System::uptime(),
            total_mem: sys.total_memory(),
            free_mem: sys.free_memory(),
            cpus: sys.cpus().len(),
            loadavg: [load.one, load.five, load.fifteen],
        };

        debug!("Collected host snapshot for {}", system.hostname);
        Ok(HostSnapshot {
            system,
            process_memory,
        })
    }
}

#[async_trait]
impl SystemProbe for SysinfoProbe {
    async fn collect(&self) -> Result<HostSnapshot, DomainError> {
        tokio::task::spawn_blocking(Self::snapshot)
            .await
            .map_err(|e| {
                error!("System probe task failed: {}", e);
                DomainError::SystemInfoUnavailable(e.to_string())
            })?
    }
}
