use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use sweepr_common::config::{SweepConfig, default_subnets};
use sweepr_core::diagnostics::SystemDiagnostics;
use sweepr_core::probe::PingProber;
use sweepr_core::report::CsvReportSink;
use sweepr_core::scheduler::Scheduler;

use crate::commands::CommandLine;
use crate::terminal::print;

pub async fn run(args: CommandLine) -> anyhow::Result<()> {
    let config = SweepConfig {
        subnets: if args.subnets.is_empty() {
            default_subnets()
        } else {
            args.subnets.clone()
        },
        probe_count: args.count,
        probe_timeout_secs: args.timeout,
        cooldown_secs: args.cooldown,
        cycle_delay_secs: args.interval,
        output_dir: args.output_dir.clone(),
    };

    std::fs::create_dir_all(&config.output_dir)?;
    print::banner(&config);

    let prober = Arc::new(PingProber::new(
        config.probe_count,
        config.probe_timeout_secs,
    ));
    let sink = Box::new(CsvReportSink::new(config.output_dir.clone()));
    let scheduler = Scheduler::new(config, prober, Box::new(SystemDiagnostics), sink);

    if args.once {
        let tally = scheduler.run_once().await?;
        print::summary(&tally);
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, stopping after the current cycle");
            let _ = shutdown_tx.send(true);
        }
    });

    scheduler.run(shutdown_rx).await;
    Ok(())
}
