//! Once-per-cycle capture of local network state (connection table and
//! routing table) as opaque text blobs. The scheduler appends these to
//! the result set as informational data for the report.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

use sweepr_common::network::host::{NetworkDiagnostics, UNAVAILABLE};

#[async_trait]
pub trait DiagnosticsSource: Send + Sync {
    async fn capture(&self) -> NetworkDiagnostics;
}

/// Captures via the platform's `netstat` and `route` commands. A
/// failing command yields an unavailable-text blob, never an error.
pub struct SystemDiagnostics;

#[async_trait]
impl DiagnosticsSource for SystemDiagnostics {
    async fn capture(&self) -> NetworkDiagnostics {
        let connections = run_capture(Command::new("netstat").arg("-a")).await;

        let mut route = Command::new("route");
        if cfg!(windows) {
            route.arg("print");
        } else {
            route.arg("-n");
        }
        let routes = run_capture(&mut route).await;

        NetworkDiagnostics {
            connections,
            routes,
        }
    }
}

async fn run_capture(cmd: &mut Command) -> String {
    match cmd.output().await {
        Ok(output) => String::from_utf8_lossy(&output.stdout).into_owned(),
        Err(e) => {
            warn!("diagnostic command failed: {e}");
            UNAVAILABLE.to_string()
        }
    }
}
