//! The outer loop: expand targets, sweep, capture diagnostics, hand
//! off, sleep, repeat. Runs until shutdown is signalled; the
//! inter-cycle delay starts after handoff, so a slow sweep pushes the
//! next cycle later instead of drifting back onto a fixed clock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use sweepr_common::config::SweepConfig;
use sweepr_common::error::ConfigError;
use sweepr_common::network::host::{SweepResult, SweepTally};
use sweepr_common::network::range::expand_targets;

use crate::diagnostics::DiagnosticsSource;
use crate::neighbor::NeighborCache;
use crate::probe::Prober;
use crate::report::ReportSink;
use crate::session::ScanSession;

pub struct Scheduler {
    config: SweepConfig,
    prober: Arc<dyn Prober>,
    neighbors: Arc<NeighborCache>,
    diagnostics: Box<dyn DiagnosticsSource>,
    sink: Box<dyn ReportSink>,
}

impl Scheduler {
    pub fn new(
        config: SweepConfig,
        prober: Arc<dyn Prober>,
        diagnostics: Box<dyn DiagnosticsSource>,
        sink: Box<dyn ReportSink>,
    ) -> Self {
        Self::with_neighbors(config, prober, Arc::new(NeighborCache::new()), diagnostics, sink)
    }

    /// Constructor taking an explicit neighbor cache, shared into every
    /// session for the life of the process.
    pub fn with_neighbors(
        config: SweepConfig,
        prober: Arc<dyn Prober>,
        neighbors: Arc<NeighborCache>,
        diagnostics: Box<dyn DiagnosticsSource>,
        sink: Box<dyn ReportSink>,
    ) -> Self {
        Self {
            config,
            prober,
            neighbors,
            diagnostics,
            sink,
        }
    }

    /// Sweeps on a fixed inter-cycle delay until `true` is sent on the
    /// shutdown channel. The signal is honored between cycles and also
    /// wakes the inter-cycle sleep early, so stopping never has to wait
    /// out the remainder of a delay period.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut cycle: u64 = 0;

        while !*shutdown.borrow() {
            cycle += 1;
            info!("starting sweep cycle {cycle}");

            match self.run_once().await {
                Ok(tally) => info!(
                    "cycle {cycle} complete: {} active, {} inactive",
                    tally.active, tally.inactive
                ),
                Err(e) => error!("cycle {cycle} aborted: {e}"),
            }

            if *shutdown.borrow() {
                break;
            }

            let delay = Duration::from_secs(self.config.cycle_delay_secs);
            info!("next sweep in {}s", delay.as_secs());

            tokio::select! {
                _ = sleep(delay) => {}
                changed = shutdown.changed() => {
                    // A closed channel means no controller is left;
                    // treat it like a stop request.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("scheduler stopped");
    }

    /// One full cycle: sweep, diagnose, deliver. Target ranges are
    /// re-expanded from configuration on every call.
    pub async fn run_once(&self) -> Result<SweepTally, ConfigError> {
        if self.config.subnets.is_empty() {
            return Err(ConfigError::NoValidRanges);
        }

        let targets = expand_targets(&self.config.subnets);
        info!(
            "sweeping {} addresses across {} subnets",
            targets.len(),
            self.config.subnets.len()
        );

        let session = ScanSession::new(
            self.prober.clone(),
            self.neighbors.clone(),
            Duration::from_secs(self.config.cooldown_secs),
        );

        let mut result: SweepResult = session.run(&targets).await;
        result.diagnostics = Some(self.diagnostics.capture().await);

        let tally = result.tally;
        if let Err(e) = self.sink.deliver(&result).await {
            // Reporting failures never stop the sweep loop.
            warn!("report delivery failed: {e:#}");
        }

        Ok(tally)
    }
}
