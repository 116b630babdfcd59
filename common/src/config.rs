//! Sweep configuration: the subnet set and the timing constants. The
//! core treats a `SweepConfig` as immutable for the duration of a cycle;
//! target ranges are re-expanded from it every cycle.

use std::net::Ipv4Addr;
use std::path::PathBuf;

use crate::network::range::{HostRange, SubnetSpec};

/// Probes issued per address.
pub const DEFAULT_PROBE_COUNT: u32 = 4;

/// Per-probe reply timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Delay applied twice per Active host (before the neighbor-cache
/// lookup and before hostname resolution). Bounds the rate of external
/// command invocation; Inactive hosts already burned the probe-timeout
/// budget and incur no extra delay.
pub const DEFAULT_COOLDOWN_SECS: u64 = 4;

/// Pause between scheduler cycles, applied after handoff.
pub const DEFAULT_CYCLE_DELAY_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub subnets: Vec<SubnetSpec>,
    pub probe_count: u32,
    pub probe_timeout_secs: u64,
    pub cooldown_secs: u64,
    pub cycle_delay_secs: u64,
    /// Where the report sink drops its per-cycle files.
    pub output_dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            subnets: default_subnets(),
            probe_count: DEFAULT_PROBE_COUNT,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            cycle_delay_secs: DEFAULT_CYCLE_DELAY_SECS,
            output_dir: PathBuf::from("."),
        }
    }
}

/// The stock subnet set: one full /24, one partial /24, and two small
/// slices.
pub fn default_subnets() -> Vec<SubnetSpec> {
    vec![
        SubnetSpec::new(Ipv4Addr::new(10, 85, 193, 0), HostRange::default()),
        SubnetSpec::new(
            Ipv4Addr::new(172, 16, 50, 0),
            HostRange::new(1, 199).expect("static bounds"),
        ),
        SubnetSpec::new(
            Ipv4Addr::new(172, 16, 53, 0),
            HostRange::new(1, 9).expect("static bounds"),
        ),
        SubnetSpec::new(
            Ipv4Addr::new(172, 16, 52, 0),
            HostRange::new(1, 1).expect("static bounds"),
        ),
    ]
}
