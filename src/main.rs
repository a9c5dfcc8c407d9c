use anyhow::Result;
use clap::Parser;
use incidence_report::{cli::Cli, config::ReportConfig, pipeline};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises the default level to trace
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Configuration file (or defaults) with CLI overrides applied
fn load_config(args: &Cli) -> Result<ReportConfig> {
    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(report) = &args.report {
        config.report_path = report.clone();
    }

    if let Err(e) = config.validate() {
        anyhow::bail!("Invalid configuration: {}", e);
    }

    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    let summary = pipeline::run(&args.input, &config)?;

    println!(
        "Ranked {} countries; report written to {}",
        summary.ranked,
        summary.report_path.display()
    );
    for image in &summary.images {
        println!("  {}", image.display());
    }
    println!("  {}", summary.table_path.display());

    Ok(())
}
