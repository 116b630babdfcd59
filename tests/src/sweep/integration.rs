use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use sweepr_common::config::SweepConfig;
use sweepr_common::network::host::{
    HostStatus, Latency, NetworkDiagnostics, ProbeReport, SweepResult,
};
use sweepr_common::network::range::{HostRange, SubnetSpec, expand_targets};
use sweepr_core::diagnostics::DiagnosticsSource;
use sweepr_core::neighbor::NeighborCache;
use sweepr_core::probe::Prober;
use sweepr_core::report::{CsvReportSink, ReportSink};
use sweepr_core::scheduler::Scheduler;
use sweepr_core::session::ScanSession;

/// Prober answering from a reply script; unscripted addresses never
/// reply.
struct ScriptedProber {
    replies: HashMap<Ipv4Addr, Vec<u64>>,
}

impl ScriptedProber {
    fn unreachable_everywhere() -> Self {
        Self {
            replies: HashMap::new(),
        }
    }

    fn with_replies(addr: Ipv4Addr, times: &[u64]) -> Self {
        let mut replies = HashMap::new();
        replies.insert(addr, times.to_vec());
        Self { replies }
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn measure(&self, addr: Ipv4Addr) -> ProbeReport {
        match self.replies.get(&addr) {
            Some(times) => ProbeReport {
                status: HostStatus::Active,
                latency: Some(Latency {
                    avg_ms: times.iter().sum::<u64>() / times.len() as u64,
                    min_ms: *times.iter().min().unwrap(),
                    max_ms: *times.iter().max().unwrap(),
                }),
                sent: times.len() as u32,
                received: times.len() as u32,
                raw_output: "scripted reply".into(),
            },
            None => ProbeReport::unreachable("Request timed out.".into()),
        }
    }

    async fn resolve_hostname(&self, _addr: Ipv4Addr) -> Option<String> {
        None
    }
}

struct StubDiagnostics;

#[async_trait]
impl DiagnosticsSource for StubDiagnostics {
    async fn capture(&self) -> NetworkDiagnostics {
        NetworkDiagnostics {
            connections: "stub connections".into(),
            routes: "stub routes".into(),
        }
    }
}

/// Sink that keeps every delivered sweep and signals shutdown after a
/// fixed number of deliveries.
struct CollectingSink {
    sweeps: Arc<Mutex<Vec<SweepResult>>>,
    shutdown: watch::Sender<bool>,
    stop_after: usize,
}

#[async_trait]
impl ReportSink for CollectingSink {
    async fn deliver(&self, sweep: &SweepResult) -> anyhow::Result<()> {
        let mut sweeps = self.sweeps.lock().unwrap();
        sweeps.push(sweep.clone());
        if sweeps.len() >= self.stop_after {
            let _ = self.shutdown.send(true);
        }
        Ok(())
    }
}

fn two_host_subnet() -> SubnetSpec {
    SubnetSpec::new(Ipv4Addr::new(10, 0, 0, 0), HostRange::new(1, 2).unwrap())
}

#[tokio::test]
async fn sweep_classifies_mixed_two_host_range() {
    let reachable = Ipv4Addr::new(10, 0, 0, 2);
    let prober = Arc::new(ScriptedProber::with_replies(reachable, &[10, 12, 11, 9]));
    let session = ScanSession::new(
        prober,
        Arc::new(NeighborCache::preloaded("10.0.0.2 at aa:bb:cc:dd:ee:ff")),
        Duration::ZERO,
    );

    let targets = expand_targets(&[two_host_subnet()]);
    assert_eq!(targets.len(), 2);

    let result = session.run(&targets).await;
    assert_eq!(result.records.len(), 2);

    let down = &result.records[0];
    assert_eq!(down.addr, Ipv4Addr::new(10, 0, 0, 1));
    assert_eq!(down.status(), HostStatus::Inactive);
    assert!(down.probe.latency.is_none());
    assert!(down.neighbors.is_none());

    let up = &result.records[1];
    assert_eq!(up.addr, reachable);
    assert_eq!(up.status(), HostStatus::Active);
    let latency = up.probe.latency.expect("latency measured");
    assert_eq!(latency.avg_ms, 10);
    assert_eq!(latency.min_ms, 9);
    assert_eq!(latency.max_ms, 12);
    assert_eq!(up.neighbors.as_deref(), Some("10.0.0.2 at aa:bb:cc:dd:ee:ff"));

    assert_eq!(result.tally.active, 1);
    assert_eq!(result.tally.inactive, 1);
}

#[tokio::test]
async fn scheduler_runs_consecutive_cycles_with_diagnostics() {
    let config = SweepConfig {
        subnets: vec![two_host_subnet()],
        cooldown_secs: 0,
        cycle_delay_secs: 0,
        ..SweepConfig::default()
    };

    let sweeps = Arc::new(Mutex::new(Vec::new()));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sink = CollectingSink {
        sweeps: sweeps.clone(),
        shutdown: shutdown_tx,
        stop_after: 2,
    };

    let scheduler = Scheduler::with_neighbors(
        config,
        Arc::new(ScriptedProber::unreachable_everywhere()),
        Arc::new(NeighborCache::preloaded("unused")),
        Box::new(StubDiagnostics),
        Box::new(sink),
    );

    scheduler.run(shutdown_rx).await;

    let sweeps = sweeps.lock().unwrap();
    assert_eq!(sweeps.len(), 2);
    for sweep in sweeps.iter() {
        assert_eq!(sweep.tally.active, 0);
        assert_eq!(sweep.tally.inactive, 2);
        assert_eq!(sweep.records.len(), 2);
        let diag = sweep.diagnostics.as_ref().expect("diagnostics attached");
        assert_eq!(diag.connections, "stub connections");
        assert_eq!(diag.routes, "stub routes");
    }
}

#[tokio::test]
async fn empty_subnet_set_aborts_the_cycle() {
    let config = SweepConfig {
        subnets: Vec::new(),
        ..SweepConfig::default()
    };

    let (shutdown_tx, _shutdown_rx) = watch::channel(false);
    let scheduler = Scheduler::with_neighbors(
        config,
        Arc::new(ScriptedProber::unreachable_everywhere()),
        Arc::new(NeighborCache::preloaded("unused")),
        Box::new(StubDiagnostics),
        Box::new(CollectingSink {
            sweeps: Arc::new(Mutex::new(Vec::new())),
            shutdown: shutdown_tx,
            stop_after: 1,
        }),
    );

    assert!(scheduler.run_once().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn shutdown_wakes_the_inter_cycle_sleep() {
    let config = SweepConfig {
        subnets: vec![two_host_subnet()],
        cooldown_secs: 0,
        cycle_delay_secs: 3600,
        ..SweepConfig::default()
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (sink_tx, _sink_rx) = watch::channel(false);
    let scheduler = Scheduler::with_neighbors(
        config,
        Arc::new(ScriptedProber::unreachable_everywhere()),
        Arc::new(NeighborCache::preloaded("unused")),
        Box::new(StubDiagnostics),
        Box::new(CollectingSink {
            sweeps: Arc::new(Mutex::new(Vec::new())),
            shutdown: sink_tx,
            stop_after: usize::MAX,
        }),
    );

    // Stop request lands while the scheduler is asleep between cycles.
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        let _ = shutdown_tx.send(true);
    });

    let start = tokio::time::Instant::now();
    scheduler.run(shutdown_rx).await;
    assert!(start.elapsed() < Duration::from_secs(3600));
}

#[tokio::test]
async fn csv_sink_writes_a_report_file() {
    let dir = std::env::temp_dir().join(format!("sweepr-report-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let prober = Arc::new(ScriptedProber::unreachable_everywhere());
    let session = ScanSession::new(
        prober,
        Arc::new(NeighborCache::preloaded("unused")),
        Duration::ZERO,
    );
    let mut result = session.run(&[Ipv4Addr::new(10, 0, 0, 1)]).await;
    result.diagnostics = Some(StubDiagnostics.capture().await);

    let sink = CsvReportSink::new(dir.clone());
    sink.deliver(&result).await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let path = entries[0].as_ref().unwrap().path();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("IP,Hostname,Status"));
    assert!(contents.contains("10.0.0.1,unknown,Inactive,N/A,N/A,N/A,0,0,N/A"));
    assert!(contents.contains("stub connections"));

    std::fs::remove_dir_all(&dir).unwrap();
}
