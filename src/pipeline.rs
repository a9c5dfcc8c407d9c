//! End-to-end report pipeline
//!
//! `compute` is the pure part: filter, aggregate, rank, analyze. `run` wraps
//! it with ingestion and, only once every number is known, writes the charts,
//! the CSV table and the HTML report. A failure at any stage aborts before
//! any file of this run is written.

use crate::aggregate::aggregate_weekly;
use crate::chart::{ChartImage, ChartKind, ChartRenderer, SvgChartRenderer};
use crate::config::ReportConfig;
use crate::csv_output::CsvOutput;
use crate::filter::filter_observations;
use crate::html_output::{standard_sections, HtmlReport, ReportSummary};
use crate::ingest::load_observations;
use crate::observation::RawObservation;
use crate::rank::{rank_by_incidence, RankedEntity};
use crate::regression::{analyze, Analysis, AnalysisError};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// File name of the ranking table inside the output directory
pub const RANKING_CSV: &str = "top_entities.csv";

/// Everything computed from the dataset, before presentation
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedReport {
    /// Rows that passed the record filter
    pub observations: usize,
    /// Countries with at least one qualifying observation
    pub countries: usize,
    pub ranked: Vec<RankedEntity>,
    pub analysis: Analysis,
}

/// Paths written by a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub report_path: PathBuf,
    pub images: Vec<PathBuf>,
    pub table_path: PathBuf,
    pub ranked: usize,
}

/// Run the pure pipeline stages over raw observations
pub fn compute(
    raw: &[RawObservation],
    config: &ReportConfig,
) -> std::result::Result<ComputedReport, AnalysisError> {
    let observations = filter_observations(raw);
    let summaries = aggregate_weekly(&observations, config.window_days);
    let ranked = rank_by_incidence(&summaries, config.top_n);
    let analysis = analyze(&ranked, &config.analysis)?;

    Ok(ComputedReport {
        observations: observations.len(),
        countries: summaries.len(),
        ranked,
        analysis,
    })
}

/// Path of a chart as referenced from the report document
///
/// Relative to the report's directory, stepping up with `..` when the output
/// directory is not below it. When one path is absolute and the other is
/// not, both are first resolved against the working directory.
pub fn image_href(report_path: &Path, output_dir: &Path, file_name: &str) -> String {
    let base = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let dir = relative_to(output_dir, base)
        .or_else(|| {
            let output_dir = std::path::absolute(output_dir).ok()?;
            let base = std::path::absolute(base).ok()?;
            relative_to(&output_dir, &base)
        })
        .unwrap_or_else(|| output_dir.to_path_buf());

    let href = dir.join(file_name);
    if href.is_absolute() {
        return href.to_string_lossy().into_owned();
    }

    href.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `path` expressed relative to the directory `base`
///
/// `None` when the two are not both absolute or both relative, or when `base`
/// climbs with `..` past their common prefix.
fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if path.is_absolute() != base.is_absolute() {
        return None;
    }

    let path: Vec<Component> = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let base: Vec<Component> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = path.iter().zip(&base).take_while(|(a, b)| a == b).count();
    if base[common..].iter().any(|c| matches!(c, Component::ParentDir)) {
        return None;
    }

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}

/// Build the HTML document for a computed report
pub fn render_report(computed: &ComputedReport, config: &ReportConfig) -> String {
    let mut report = HtmlReport::new("COVID-19 Report");
    let sections = standard_sections(
        |kind: ChartKind| image_href(&config.report_path, &config.output_dir, kind.file_name()),
        &computed.ranked,
        &computed.analysis,
    );
    for section in sections {
        report.add_section(section);
    }

    report.to_html(Some(&ReportSummary {
        ranked: &computed.ranked,
        analysis: &computed.analysis,
    }))
}

/// Write charts, ranking table and report for a computed result
pub fn write_artifacts(
    computed: &ComputedReport,
    config: &ReportConfig,
    renderer: &dyn ChartRenderer,
) -> Result<RunSummary> {
    let images: Vec<ChartImage> = renderer.render(&computed.ranked, &computed.analysis);
    let table = CsvOutput::from_ranking(&computed.ranked, &computed.analysis.regression.points)
        .to_csv()
        .context("Failed to format ranking table")?;
    let html = render_report(computed, config);

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut image_paths = Vec::with_capacity(images.len());
    for image in &images {
        let path = config.output_dir.join(image.file_name());
        fs::write(&path, &image.content)
            .with_context(|| format!("Failed to write chart {}", path.display()))?;
        tracing::debug!("Wrote {}", path.display());
        image_paths.push(path);
    }

    let table_path = config.output_dir.join(RANKING_CSV);
    fs::write(&table_path, table)
        .with_context(|| format!("Failed to write ranking table {}", table_path.display()))?;

    if let Some(parent) = config.report_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create report directory {}", parent.display())
            })?;
        }
    }
    fs::write(&config.report_path, html)
        .with_context(|| format!("Failed to write report {}", config.report_path.display()))?;

    tracing::info!(
        "Wrote {} charts to {} and report to {}",
        image_paths.len(),
        config.output_dir.display(),
        config.report_path.display()
    );

    Ok(RunSummary {
        report_path: config.report_path.clone(),
        images: image_paths,
        table_path,
        ranked: computed.ranked.len(),
    })
}

/// Ingest the dataset at `input`, compute, and write every artifact
pub fn run(input: &Path, config: &ReportConfig) -> Result<RunSummary> {
    let raw = load_observations(input)
        .with_context(|| format!("Failed to ingest {}", input.display()))?;

    let computed = compute(&raw, config)?;
    tracing::info!(
        "{} observations across {} countries; {} ranked",
        computed.observations,
        computed.countries,
        computed.ranked.len()
    );

    let renderer = SvgChartRenderer::new(config.analysis.histogram_bins);
    write_artifacts(&computed, config, &renderer)
}
