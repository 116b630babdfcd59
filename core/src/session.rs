//! One sweep over an address sequence.
//!
//! Addresses are probed sequentially and records come out in input
//! order. The cooldown discipline is deliberately asymmetric: Inactive
//! hosts already spent the full probe-timeout budget failing, so only
//! Active hosts pay the two fixed delays that bound how fast external
//! commands are invoked for successful hosts.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};

use sweepr_common::network::host::{HostRecord, HostStatus, SweepResult};

use crate::aggregate;
use crate::neighbor::NeighborCache;
use crate::probe::Prober;

pub struct ScanSession {
    prober: Arc<dyn Prober>,
    neighbors: Arc<NeighborCache>,
    cooldown: Duration,
}

impl ScanSession {
    pub fn new(prober: Arc<dyn Prober>, neighbors: Arc<NeighborCache>, cooldown: Duration) -> Self {
        Self {
            prober,
            neighbors,
            cooldown,
        }
    }

    /// Probes every address in order and assembles the sweep's records.
    ///
    /// No per-address failure aborts the run; the worst outcome for a
    /// single address is an Inactive record carrying diagnostic text.
    pub async fn run(&self, targets: &[Ipv4Addr]) -> SweepResult {
        let mut records = Vec::with_capacity(targets.len());

        for &addr in targets {
            debug!("probing {addr}");
            records.push(self.scan_one(addr).await);
        }

        let tally = aggregate::summarize(&records);
        info!(
            "sweep finished: {} active, {} inactive",
            tally.active, tally.inactive
        );

        SweepResult {
            records,
            tally,
            diagnostics: None,
        }
    }

    async fn scan_one(&self, addr: Ipv4Addr) -> HostRecord {
        let probe = self.prober.measure(addr).await;

        if probe.status == HostStatus::Inactive {
            // No neighbor-table lookup for unreachable hosts.
            return HostRecord {
                addr,
                hostname: None,
                probe,
                neighbors: None,
            };
        }

        sleep(self.cooldown).await;
        let neighbors = self.neighbors.snapshot().await;

        sleep(self.cooldown).await;
        let hostname = self.prober.resolve_hostname(addr).await;

        info!(
            "{addr} is active ({})",
            hostname.as_deref().unwrap_or("no hostname")
        );

        HostRecord {
            addr,
            hostname,
            probe,
            neighbors: Some(neighbors.shared_text()),
        }
    }
}
