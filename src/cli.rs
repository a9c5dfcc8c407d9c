//! CLI argument parsing for incidence-report

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "incidence-report")]
#[command(version)]
#[command(
    about = "Rank countries by weekly COVID-19 incidence and write an HTML report",
    long_about = None
)]
pub struct Cli {
    /// OWID-format case dataset (CSV with iso_code, location, date, new_cases, population)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for chart images and the ranking table (overrides config)
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path of the generated HTML report (overrides config)
    #[arg(short = 'r', long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Enable verbose tracing output on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
