//! Health and diagnostics reports

use serde::Serialize;

/// `GET /health` body.
#[derive(Debug, Clone, Serialize)]
pub struct LivenessReport {
    pub status: &'static str,
    /// Seconds since the process started.
    pub uptime: f64,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub version: String,
}

/// Host and process memory as collected by a [`crate::probes::SystemProbe`].
#[derive(Debug, Clone, PartialEq)]
pub struct HostSnapshot {
    pub system: SystemInfo,
    pub process_memory: MemoryUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub platform: String,
    pub release: String,
    pub hostname: String,
    pub uptime: u64,
    pub total_mem: u64,
    pub free_mem: u64,
    pub cpus: usize,
    pub loadavg: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MemoryUsage {
    pub rss: u64,
    #[serde(rename = "virtual")]
    pub virtual_memory: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInfo {
    pub pid: u32,
    pub uptime: f64,
    pub memory_usage: MemoryUsage,
    pub runtime_version: String,
    pub env: String,
}

/// `GET /health/system` body.
#[derive(Debug, Clone, Serialize)]
pub struct SystemReport {
    pub status: &'static str,
    pub system: SystemInfo,
    pub process: ProcessInfo,
}
