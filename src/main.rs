use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use kube_pod_check::{load_config, read_snapshot, LimitStore, PodCheck, Severity};

fn main() -> ExitCode {
    match run() {
        Ok(severity) => ExitCode::from(severity.exit_code()),
        Err(e) => {
            error!("check failed: {:#}", e);
            println!("[{}] {:#}", Severity::Unknown, e);
            ExitCode::from(Severity::Unknown.exit_code())
        }
    }
}

fn run() -> Result<Severity> {
    let cfg = load_config()?;
    init_tracing(cfg.debug);

    // Refuse to evaluate with a broken limit table
    let limits = LimitStore::from_config(&cfg)?;
    info!("loaded {} limits", limits.len());

    let pods = read_snapshot(&cfg.snapshot).context("Failed to read pod snapshot")?;
    info!("evaluating {} pods", pods.len());

    let check = PodCheck::new(&limits);
    let report = check.report(&pods);

    let summary = report.summary();
    info!(
        "{} metrics evaluated: {} critical, {} warning, {} unknown, {} ok",
        summary.metric_count,
        summary.critical_count,
        summary.warning_count,
        summary.unknown_count,
        summary.ok_count
    );

    let output = report.render();
    println!("{}", output.text);
    Ok(output.severity)
}

fn init_tracing(debug: bool) {
    let mut filter = EnvFilter::from_default_env();
    if debug {
        if let Ok(directive) = "debug".parse() {
            filter = filter.add_directive(directive);
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
