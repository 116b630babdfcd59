//! Reachability probing via the system `ping` command.
//!
//! The command's exit status decides Active/Inactive; its stdout is
//! scanned for per-reply round-trip times and carried verbatim in the
//! record as diagnostic text.

use std::net::{IpAddr, Ipv4Addr};
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::warn;

use sweepr_common::error::ProbeError;
use sweepr_common::network::host::{HostStatus, Latency, ProbeReport};

use super::Prober;

/// Reverse lookups run on the blocking pool with a hard cap so a
/// misbehaving resolver cannot stall the session.
const RESOLVE_TIMEOUT: Duration = Duration::from_secs(2);

/// Reply-line markers across platforms and locales. The tool has to
/// cope with `time=12.4 ms` (Linux), `time<1ms` (Windows), and
/// `tempo=12ms` (pt-BR Windows).
const REPLY_MARKERS: [&str; 3] = ["time=", "time<", "tempo="];

pub struct PingProber {
    count: u32,
    timeout_secs: u64,
}

impl PingProber {
    pub fn new(count: u32, timeout_secs: u64) -> Self {
        Self {
            count,
            timeout_secs,
        }
    }
}

#[async_trait]
impl Prober for PingProber {
    async fn measure(&self, addr: Ipv4Addr) -> ProbeReport {
        match ping_command(addr, self.count, self.timeout_secs).output().await {
            Ok(output) => summarize_output(&output, self.count),
            Err(source) => {
                // Missing binary or permission error. The address is
                // recorded Inactive and the sweep moves on.
                let err = ProbeError::from(source);
                warn!("probe for {addr} could not start: {err}");
                ProbeReport::unreachable(err.to_string())
            }
        }
    }

    async fn resolve_hostname(&self, addr: Ipv4Addr) -> Option<String> {
        let lookup = tokio::time::timeout(
            RESOLVE_TIMEOUT,
            tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&IpAddr::V4(addr)).ok()),
        )
        .await;

        match lookup {
            Ok(Ok(Some(name))) if name != addr.to_string() => Some(name),
            _ => None,
        }
    }
}

fn ping_command(addr: Ipv4Addr, count: u32, timeout_secs: u64) -> Command {
    let mut cmd = Command::new("ping");
    if cfg!(windows) {
        // Windows takes the reply timeout in milliseconds.
        cmd.args(["-n", &count.to_string(), "-w", &(timeout_secs * 1000).to_string()]);
    } else {
        cmd.args(["-c", &count.to_string(), "-W", &timeout_secs.to_string()]);
    }
    cmd.arg(addr.to_string());
    cmd
}

fn summarize_output(output: &Output, count: u32) -> ProbeReport {
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() {
        return ProbeReport {
            status: HostStatus::Inactive,
            latency: None,
            sent: 0,
            received: 0,
            raw_output: stdout,
        };
    }

    let times: Vec<u64> = stdout.lines().filter_map(parse_reply_latency).collect();

    // A success exit with no parseable reply line still counts as
    // Active, just without measurable latency.
    let latency = reduce_latencies(&times);

    ProbeReport {
        status: HostStatus::Active,
        latency,
        sent: count,
        received: count,
        raw_output: stdout,
    }
}

fn reduce_latencies(times: &[u64]) -> Option<Latency> {
    let (first, rest) = times.split_first()?;
    let mut min = *first;
    let mut max = *first;
    let mut sum = *first;
    for &t in rest {
        min = min.min(t);
        max = max.max(t);
        sum += t;
    }
    Some(Latency {
        avg_ms: sum / times.len() as u64,
        min_ms: min,
        max_ms: max,
    })
}

/// Extracts the round-trip time in whole milliseconds from one reply
/// line, or `None` for lines that are not replies.
fn parse_reply_latency(line: &str) -> Option<u64> {
    let idx = REPLY_MARKERS
        .iter()
        .find_map(|marker| line.find(marker).map(|i| i + marker.len()))?;

    let number: String = line[idx..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    number.parse::<f64>().ok().map(|ms| ms as u64)
}
