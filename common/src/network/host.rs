//! Per-host sweep records and the result set a completed sweep hands to
//! the reporting collaborator.

use std::net::Ipv4Addr;
use std::sync::Arc;

/// Sentinel spellings used at the reporting boundary. Inside the data
/// model absence is an `Option`, never a magic string.
pub const UNAVAILABLE: &str = "N/A";
pub const UNKNOWN_HOST: &str = "unknown";

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum HostStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for HostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostStatus::Active => write!(f, "Active"),
            HostStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Round-trip statistics in whole milliseconds, present only when at
/// least one reply line carried a parseable time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub avg_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
}

/// Outcome of one reachability measurement against one address.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub status: HostStatus,
    pub latency: Option<Latency>,
    pub sent: u32,
    pub received: u32,
    /// Diagnostic text: the probe command's stdout, or the error
    /// description when the command could not run.
    pub raw_output: String,
}

impl ProbeReport {
    /// An address that could not be probed at all. Carries the failure
    /// text so the reporting collaborator can show what happened.
    pub fn unreachable(raw_output: String) -> Self {
        Self {
            status: HostStatus::Inactive,
            latency: None,
            sent: 0,
            received: 0,
            raw_output,
        }
    }
}

/// One entry per probed address within a sweep.
#[derive(Debug, Clone)]
pub struct HostRecord {
    pub addr: Ipv4Addr,
    /// Resolved reverse-lookup name; `None` renders as "unknown".
    pub hostname: Option<String>,
    pub probe: ProbeReport,
    /// Shared neighbor-table snapshot; `None` for Inactive hosts.
    pub neighbors: Option<Arc<str>>,
}

impl HostRecord {
    pub fn status(&self) -> HostStatus {
        self.probe.status
    }
}

/// Opaque network-state blobs captured once per scheduler cycle and
/// appended to the result set as informational data. Never counted by
/// the aggregator.
#[derive(Debug, Clone)]
pub struct NetworkDiagnostics {
    pub connections: String,
    pub routes: String,
}

/// Active/inactive counts over one sweep's host records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepTally {
    pub active: usize,
    pub inactive: usize,
}

impl SweepTally {
    pub fn total(&self) -> usize {
        self.active + self.inactive
    }
}

/// Everything one sweep produced, in probe order. Owned by the
/// scheduler cycle that produced it until handed to the report sink.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub records: Vec<HostRecord>,
    pub tally: SweepTally,
    pub diagnostics: Option<NetworkDiagnostics>,
}
