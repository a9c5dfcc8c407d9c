//! Chart rendering for the incidence report
//!
//! The pipeline hands finished numbers to a [`ChartRenderer`] and receives
//! named images back; nothing here feeds into the computation. The default
//! [`SvgChartRenderer`] draws four standalone SVG documents:
//! - Population and incidence bar charts side by side
//! - Population vs incidence scatter with country labels
//! - The same scatter with the fitted regression line
//! - Residual histogram with the fitted normal density

mod histogram;
pub mod svg;

pub use histogram::{histogram, HistogramBin};

use crate::rank::RankedEntity;
use crate::regression::Analysis;
use svg::{
    AxisLabels, PlotArea, Scale, SvgDocument, TextStyle, BAR_COLOR, LINE_COLOR, POINT_COLOR,
};

/// The four report charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    BarCharts,
    Scatter,
    LinearFit,
    Residuals,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::BarCharts,
        ChartKind::Scatter,
        ChartKind::LinearFit,
        ChartKind::Residuals,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::BarCharts => "bar_charts.svg",
            ChartKind::Scatter => "scatter.svg",
            ChartKind::LinearFit => "linear_fit.svg",
            ChartKind::Residuals => "residuals.svg",
        }
    }
}

/// A rendered chart ready to be written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub kind: ChartKind,
    /// SVG document text
    pub content: String,
}

impl ChartImage {
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }
}

/// Turns analysis results into images
pub trait ChartRenderer {
    fn render(&self, ranked: &[RankedEntity], analysis: &Analysis) -> Vec<ChartImage>;
}

/// Renders every chart as a standalone SVG document
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    histogram_bins: usize,
}

impl SvgChartRenderer {
    pub fn new(histogram_bins: usize) -> Self {
        Self { histogram_bins }
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, ranked: &[RankedEntity], analysis: &Analysis) -> Vec<ChartImage> {
        ChartKind::ALL
            .iter()
            .map(|&kind| {
                let content = match kind {
                    ChartKind::BarCharts => bar_charts(ranked),
                    ChartKind::Scatter => scatter(ranked, None),
                    ChartKind::LinearFit => scatter(ranked, Some(analysis)),
                    ChartKind::Residuals => residual_histogram(analysis, self.histogram_bins),
                };
                tracing::debug!("Rendered {} ({} bytes)", kind.file_name(), content.len());
                ChartImage { kind, content }
            })
            .collect()
    }
}

const PANEL_WIDTH: f64 = 800.0;

/// Two bar panels: population (left) and cases per 100k (right)
fn bar_charts(ranked: &[RankedEntity]) -> String {
    let mut doc = SvgDocument::new((PANEL_WIDTH * 2.0) as u32, 600);

    let panels: [(String, &str, Vec<f64>); 2] = [
        (
            format!("Population of Countries (Top {})", ranked.len()),
            "Population",
            ranked.iter().map(|r| r.population).collect(),
        ),
        (
            "Average Daily New COVID-19 Cases per 100,000 Inhabitants".to_string(),
            "Cases per 100,000",
            ranked.iter().map(|r| r.cases_per_100k).collect(),
        ),
    ];

    for (i, (title, y_label, values)) in panels.iter().enumerate() {
        let area = PlotArea {
            left: PANEL_WIDTH * i as f64 + 90.0,
            top: 60.0,
            width: PANEL_WIDTH - 120.0,
            height: 440.0,
        };
        let y = Scale::from_zero(values.iter().copied(), area.y_range());
        doc.axes(
            &area,
            None,
            &y,
            &AxisLabels {
                title: title.as_str(),
                x: None,
                y: *y_label,
            },
        );

        let slot = area.width / values.len().max(1) as f64;
        let baseline = y.map(0.0);
        for (j, (entity, &value)) in ranked.iter().zip(values).enumerate() {
            let x = area.left + slot * j as f64;
            let top = y.map(value);
            doc.rect(
                x + slot * 0.1,
                top.min(baseline),
                slot * 0.8,
                (baseline - top).abs(),
                BAR_COLOR,
                1.0,
            );
            doc.text(
                x + slot / 2.0 + 4.0,
                area.bottom() + 10.0,
                &entity.code,
                TextStyle::label().anchor("end").rotate(-90.0),
            );
        }
    }

    doc.finish()
}

/// Population vs incidence; with an analysis, the fitted line replaces labels
fn scatter(ranked: &[RankedEntity], analysis: Option<&Analysis>) -> String {
    let mut doc = SvgDocument::new(1000, 600);
    let area = PlotArea {
        left: 100.0,
        top: 60.0,
        width: 860.0,
        height: 450.0,
    };

    let x = Scale::padded(ranked.iter().map(|r| r.population), 0.05, area.x_range());
    let mut y_values: Vec<f64> = ranked.iter().map(|r| r.cases_per_100k).collect();
    if let Some(analysis) = analysis {
        y_values.extend(analysis.regression.points.iter().map(|p| p.fitted));
    }
    let y = Scale::padded(y_values, 0.08, area.y_range());

    let title = match analysis {
        Some(_) => "Linear Regression Fit".to_string(),
        None => format!(
            "Relationship Between Population Size and COVID-19 Incidence (Top {})",
            ranked.len()
        ),
    };
    doc.axes(
        &area,
        Some(&x),
        &y,
        &AxisLabels {
            title: &title,
            x: Some("Population"),
            y: "Cases per 100,000 Inhabitants",
        },
    );

    for entity in ranked {
        let (px, py) = (x.map(entity.population), y.map(entity.cases_per_100k));
        doc.circle(px, py, 5.0, POINT_COLOR);
        if analysis.is_none() {
            doc.text(
                px + 7.0,
                py - 7.0,
                &entity.code,
                TextStyle::label().anchor("start"),
            );
        }
    }

    if let Some(analysis) = analysis {
        let fit = &analysis.regression.fit;
        let (x0, x1) = ranked
            .iter()
            .map(|r| r.population)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if x0.is_finite() && x1.is_finite() {
            doc.line(
                x.map(x0),
                y.map(fit.predict(x0)),
                x.map(x1),
                y.map(fit.predict(x1)),
                LINE_COLOR,
                2.0,
            );
        }
    }

    doc.finish()
}

/// Residual histogram with the normal density overlay
fn residual_histogram(analysis: &Analysis, bins: usize) -> String {
    let mut doc = SvgDocument::new(800, 600);
    let area = PlotArea {
        left: 100.0,
        top: 60.0,
        width: 660.0,
        height: 450.0,
    };

    let residuals = analysis.regression.residuals();
    let bins = histogram(&residuals, bins);

    let x = Scale::new(
        (
            bins.first().map_or(0.0, |b| b.start),
            bins.last().map_or(1.0, |b| b.end),
        ),
        area.x_range(),
    );
    let heights = bins
        .iter()
        .map(|b| b.density)
        .chain(analysis.density.iter().map(|p| p.density));
    let y = Scale::from_zero(heights, area.y_range());

    doc.axes(
        &area,
        Some(&x),
        &y,
        &AxisLabels {
            title: "Histogram of Residuals with Normal Distribution",
            x: Some("Residual"),
            y: "Probability Density",
        },
    );

    let baseline = y.map(0.0);
    for bin in &bins {
        let left = x.map(bin.start);
        let top = y.map(bin.density);
        doc.rect(
            left,
            top,
            x.map(bin.end) - left,
            baseline - top,
            BAR_COLOR,
            0.6,
        );
    }

    if !analysis.density.is_empty() {
        let points: Vec<(f64, f64)> = analysis
            .density
            .iter()
            .map(|p| (x.map(p.x), y.map(p.density)))
            .collect();
        doc.polyline(&points, LINE_COLOR, 2.0);
    }

    doc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::{analyze, AnalysisConfig};

    fn ranked() -> Vec<RankedEntity> {
        [
            ("SMR", 33_600.0, 820.0),
            ("LIE", 39_300.0, 610.0),
            ("LUX", 647_600.0, 210.0),
            ("DEU", 83_369_800.0, 95.0),
            ("USA", 338_290_000.0, 40.0),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(code, population, rate))| RankedEntity {
            rank: i + 1,
            code: code.to_string(),
            name: code.to_string(),
            population,
            avg_new_cases: rate * population / 100_000.0,
            cases_per_100k: rate,
        })
        .collect()
    }

    fn render_all() -> Vec<ChartImage> {
        let ranked = ranked();
        let analysis = analyze(&ranked, &AnalysisConfig::default()).unwrap();
        SvgChartRenderer::default().render(&ranked, &analysis)
    }

    #[test]
    fn test_renders_four_named_charts() {
        let images = render_all();
        let names: Vec<&str> = images.iter().map(|i| i.file_name()).collect();

        assert_eq!(
            names,
            vec!["bar_charts.svg", "scatter.svg", "linear_fit.svg", "residuals.svg"]
        );
        for image in &images {
            assert!(image.content.starts_with("<svg"));
            assert!(image.content.trim_end().ends_with("</svg>"));
            assert!(!image.content.contains("NaN"));
        }
    }

    #[test]
    fn test_bar_charts_label_every_country_rotated() {
        let images = render_all();
        let bars = &images[0].content;

        for code in ["SMR", "LIE", "LUX", "DEU", "USA"] {
            assert!(bars.contains(&format!(">{}</text>", code)));
        }
        assert!(bars.contains("rotate(-90"));
        // Two panels of five bars, plus the background rect
        assert_eq!(bars.matches("<rect").count(), 11);
    }

    #[test]
    fn test_scatter_annotates_points() {
        let images = render_all();
        let scatter = &images[1].content;

        assert_eq!(scatter.matches("<circle").count(), 5);
        assert!(scatter.contains(">SMR</text>"));
    }

    #[test]
    fn test_linear_fit_draws_line() {
        let images = render_all();
        let fit = &images[2].content;

        assert_eq!(fit.matches("<circle").count(), 5);
        assert!(fit.contains(&format!("stroke=\"{}\"", LINE_COLOR)));
        assert!(fit.contains("Linear Regression Fit"));
    }

    #[test]
    fn test_residual_histogram_with_overlay() {
        let images = render_all();
        let residuals = &images[3].content;

        assert!(residuals.contains("<polyline"));
        // Ten histogram bars plus the background rect
        assert_eq!(residuals.matches("<rect").count(), 11);
    }

    #[test]
    fn test_residual_histogram_without_overlay() {
        let ranked: Vec<RankedEntity> = ranked()
            .into_iter()
            .enumerate()
            .map(|(i, r)| RankedEntity {
                population: i as f64,
                cases_per_100k: 2.0 * i as f64 + 1.0,
                ..r
            })
            .collect();
        let analysis = analyze(&ranked, &AnalysisConfig::default()).unwrap();
        let svg = residual_histogram(&analysis, 10);

        assert!(!svg.contains("<polyline"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_titles_follow_ranking_size() {
        let images = render_all();

        assert!(images[0].content.contains("Population of Countries (Top 5)"));
        assert!(images[1].content.contains("Incidence (Top 5)"));
        assert!(!images[0].content.contains("Top 20"));

        let three = &ranked()[..3];
        assert!(scatter(three, None).contains("Incidence (Top 3)"));
    }

    #[test]
    fn test_escapes_codes() {
        let mut ranked = ranked();
        ranked[0].code = "<X>".to_string();
        let svg = scatter(&ranked, None);
        assert!(svg.contains("&lt;X&gt;"));
        assert!(!svg.contains("<X>"));
    }
}
