//! Reporting boundary. The engine owes the collaborator behind
//! [`ReportSink`] one complete, order-preserving record list per cycle;
//! everything about persistence and presentation lives on the other
//! side of the trait.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use csv::Writer;
use tracing::info;

use sweepr_common::network::host::{HostRecord, SweepResult, UNAVAILABLE, UNKNOWN_HOST};

#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, sweep: &SweepResult) -> Result<()>;
}

/// Writes each sweep to a timestamped CSV file. Absent values take
/// their sentinel spellings (`N/A`, `unknown`) here and nowhere else.
pub struct CsvReportSink {
    dir: PathBuf,
}

impl CsvReportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn next_path(&self) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        self.dir.join(format!("sweep_status_{stamp}.csv"))
    }
}

#[async_trait]
impl ReportSink for CsvReportSink {
    async fn deliver(&self, sweep: &SweepResult) -> Result<()> {
        let path = self.next_path();
        write_sweep_csv(&path, sweep)
            .with_context(|| format!("writing sweep report to {}", path.display()))?;
        info!("sweep report written to {}", path.display());
        Ok(())
    }
}

fn write_sweep_csv(path: &Path, sweep: &SweepResult) -> Result<()> {
    let mut writer = Writer::from_path(path)?;

    writer.write_record([
        "IP",
        "Hostname",
        "Status",
        "Avg Latency (ms)",
        "Min Latency (ms)",
        "Max Latency (ms)",
        "Packets Sent",
        "Packets Received",
        "Neighbor Table",
    ])?;

    for record in &sweep.records {
        writer.write_record(host_row(record))?;
    }

    if let Some(diag) = &sweep.diagnostics {
        writer.write_record([
            "Additional Info",
            UNAVAILABLE,
            UNAVAILABLE,
            diag.connections.as_str(),
            diag.routes.as_str(),
            UNAVAILABLE,
            UNAVAILABLE,
            UNAVAILABLE,
            UNAVAILABLE,
        ])?;
    }

    let active = format!("active={}", sweep.tally.active);
    let inactive = format!("inactive={}", sweep.tally.inactive);
    writer.write_record([
        "Summary",
        "",
        "",
        active.as_str(),
        inactive.as_str(),
        "",
        "",
        "",
        "",
    ])?;

    writer.flush()?;
    Ok(())
}

fn host_row(record: &HostRecord) -> [String; 9] {
    let (avg, min, max) = match record.probe.latency {
        Some(l) => (
            l.avg_ms.to_string(),
            l.min_ms.to_string(),
            l.max_ms.to_string(),
        ),
        None => (
            UNAVAILABLE.to_string(),
            UNAVAILABLE.to_string(),
            UNAVAILABLE.to_string(),
        ),
    };

    [
        record.addr.to_string(),
        record
            .hostname
            .clone()
            .unwrap_or_else(|| UNKNOWN_HOST.to_string()),
        record.status().to_string(),
        avg,
        min,
        max,
        record.probe.sent.to_string(),
        record.probe.received.to_string(),
        record
            .neighbors
            .as_deref()
            .unwrap_or(UNAVAILABLE)
            .to_string(),
    ]
}
