use colored::*;

use sweepr_common::config::SweepConfig;
use sweepr_common::network::host::SweepTally;

pub fn banner(config: &SweepConfig) {
    println!("{}", "sweepr".bold());

    let subnets: Vec<String> = config.subnets.iter().map(|s| s.to_string()).collect();
    println!(
        "  {} {}",
        "subnets:".color(Color::BrightBlack),
        subnets.join(", ")
    );
    println!(
        "  {} {} probes, {}s timeout, {}s cooldown, {}s between cycles",
        "timing: ".color(Color::BrightBlack),
        config.probe_count,
        config.probe_timeout_secs,
        config.cooldown_secs,
        config.cycle_delay_secs
    );
    println!(
        "  {} {}",
        "reports:".color(Color::BrightBlack),
        config.output_dir.display()
    );
    println!();
}

pub fn summary(tally: &SweepTally) {
    let active = format!("{} active", tally.active).green().bold();
    let inactive = format!("{} inactive", tally.inactive).red();
    println!(
        "\nSweep complete: {active}, {inactive} ({} hosts probed)",
        tally.total()
    );
}
