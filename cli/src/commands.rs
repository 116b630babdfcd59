pub mod sweep;

use std::path::PathBuf;

use clap::Parser;
use sweepr_common::config::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_CYCLE_DELAY_SECS, DEFAULT_PROBE_COUNT,
    DEFAULT_PROBE_TIMEOUT_SECS,
};
use sweepr_common::network::range::SubnetSpec;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Periodic network-presence sweeper.")]
pub struct CommandLine {
    /// Subnet to sweep, e.g. `10.85.193.0` or `172.16.50.0:1-199`.
    /// Repeatable; the built-in subnet set is used when omitted.
    #[arg(short, long = "subnet", value_name = "SPEC")]
    pub subnets: Vec<SubnetSpec>,

    /// Seconds to wait between sweep cycles
    #[arg(long, default_value_t = DEFAULT_CYCLE_DELAY_SECS)]
    pub interval: u64,

    /// Cooldown seconds applied twice per active host
    #[arg(long, default_value_t = DEFAULT_COOLDOWN_SECS)]
    pub cooldown: u64,

    /// Echo probes issued per address
    #[arg(long, default_value_t = DEFAULT_PROBE_COUNT)]
    pub count: u32,

    /// Per-probe reply timeout in seconds
    #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Directory the sweep reports are written to
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Run a single sweep cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
