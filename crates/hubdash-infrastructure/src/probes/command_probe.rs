//! Network tests backed by the host's `ping` and `traceroute` binaries

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{error, info, warn};

use hubdash_core::domain::TestKind;
use hubdash_core::error::DomainError;
use hubdash_core::probes::NetworkProbe;
use hubdash_shared::constants::{PING_COUNT, TRACEROUTE_MAX_HOPS};

/// Spawns the diagnostic binary directly (no shell), so the domain is passed
/// as a single argument. The child is killed when the time bound elapses.
pub struct CommandProbe {
    timeout: Duration,
    ping_program: String,
    traceroute_program: String,
}

impl CommandProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ping_program: "ping".to_string(),
            traceroute_program: "traceroute".to_string(),
        }
    }

    /// Replace the binary used for `kind`.
    pub fn with_program(mut self, kind: TestKind, program: &str) -> Self {
        match kind {
            TestKind::Ping => self.ping_program = program.to_string(),
            TestKind::Traceroute => self.traceroute_program = program.to_string(),
        }
        self
    }

    fn command(&self, kind: TestKind, domain: &str) -> Command {
        let mut cmd = match kind {
            TestKind::Ping => {
                let mut cmd = Command::new(&self.ping_program);
                cmd.arg("-c").arg(PING_COUNT.to_string());
                cmd
            }
            TestKind::Traceroute => {
                let mut cmd = Command::new(&self.traceroute_program);
                cmd.arg("-m").arg(TRACEROUTE_MAX_HOPS.to_string());
                cmd
            }
        };
        cmd.arg(domain)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl NetworkProbe for CommandProbe {
    async fn run(&self, kind: TestKind, domain: &str) -> Result<String, DomainError> {
        info!("Running network test: {} {}", kind, domain);

        let child = self.command(kind, domain).spawn().map_err(|e| {
            error!("Failed to spawn {} for {}: {}", kind, domain, e);
            DomainError::ProbeFailed(e.to_string())
        })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| DomainError::ProbeFailed(e.to_string()))?,
            Err(_) => {
                warn!("Network test {} {} timed out after {:?}", kind, domain, self.timeout);
                return Err(DomainError::ProbeTimeout);
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let detail = if stderr.trim().is_empty() {
                format!("{} exited with {}", kind, output.status)
            } else {
                stderr.trim().to_string()
            };
            error!("Network test {} {} failed: {}", kind, domain, detail);
            return Err(DomainError::ProbeFailed(detail));
        }

        Ok(if stdout.trim().is_empty() { stderr } else { stdout })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_arguments_passed_without_shell() {
        let probe = CommandProbe::new(Duration::from_secs(5)).with_program(TestKind::Ping, "echo");
        let output = probe.run(TestKind::Ping, "ghcr.io; rm -rf /").await.unwrap();
        assert_eq!(output.trim(), "-c 4 ghcr.io; rm -rf /");
    }

    #[tokio::test]
    async fn test_traceroute_hop_limit() {
        let probe =
            CommandProbe::new(Duration::from_secs(5)).with_program(TestKind::Traceroute, "echo");
        let output = probe.run(TestKind::Traceroute, "quay.io").await.unwrap();
        assert_eq!(output.trim(), "-m 10 quay.io");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_failure() {
        let probe = CommandProbe::new(Duration::from_secs(5)).with_program(TestKind::Ping, "false");
        let result = probe.run(TestKind::Ping, "example.com").await;
        assert!(matches!(result, Err(DomainError::ProbeFailed(_))));
    }

    #[tokio::test]
    async fn test_missing_binary_is_failure() {
        let probe = CommandProbe::new(Duration::from_secs(5))
            .with_program(TestKind::Ping, "hubdash-no-such-binary");
        let result = probe.run(TestKind::Ping, "example.com").await;
        assert!(matches!(result, Err(DomainError::ProbeFailed(_))));
    }

    #[tokio::test]
    async fn test_time_bound() {
        let probe = CommandProbe::new(Duration::ZERO).with_program(TestKind::Ping, "echo");
        let result = probe.run(TestKind::Ping, "example.com").await;
        assert!(matches!(result, Err(DomainError::ProbeTimeout)));
    }
}
