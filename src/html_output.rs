//! HTML output format for the incidence report
//!
//! A single static document with embedded CSS: four narrative sections, each
//! referencing one chart image, followed by the fit summary and the ranking
//! table.

use crate::chart::ChartKind;
use crate::rank::RankedEntity;
use crate::regression::Analysis;

/// One narrative section of the report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub heading: String,
    pub paragraphs: Vec<String>,
    /// Image path relative to the report file
    pub image_src: Option<String>,
}

/// Data for the summary tables at the end of the report
#[derive(Debug, Clone, Copy)]
pub struct ReportSummary<'a> {
    pub ranked: &'a [RankedEntity],
    pub analysis: &'a Analysis,
}

/// HTML output formatter
#[derive(Debug)]
pub struct HtmlReport {
    title: String,
    sections: Vec<ReportSection>,
}

impl HtmlReport {
    /// Create a new, empty report
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section
    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: Georgia, "Times New Roman", serif;
            max-width: 1000px;
            margin: 0 auto;
            padding: 0 16px 32px;
            line-height: 1.5;
            color: #222;
        }
        h1 {
            border-bottom: 2px solid #c0392b;
            padding-bottom: 6px;
        }
        h2 {
            margin-top: 36px;
            color: #7b241c;
        }
        img {
            display: block;
            max-width: 100%;
            margin: 12px 0 24px;
        }
        table {
            border-collapse: collapse;
            min-width: 60%;
            margin: 12px 0 24px;
            font-size: 0.95em;
        }
        th, td {
            border-bottom: 1px solid #e5e5e5;
            padding: 4px 10px;
        }
        th {
            text-align: left;
            background-color: #f4ecec;
        }
        tbody tr:hover {
            background-color: #fbf6f6;
        }
        .code {
            font-family: "Courier New", monospace;
            font-weight: 600;
        }
        .number {
            font-variant-numeric: tabular-nums;
            text-align: right;
        }
        .fit-table th {
            width: 40%;
        }
        .footer {
            margin-top: 40px;
            font-size: 0.85em;
            color: #777;
        }
        "#
    }

    fn render_section(section: &ReportSection) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            "    <h2>{}</h2>\n",
            Self::escape_html(&section.heading)
        ));
        for paragraph in &section.paragraphs {
            html.push_str(&format!("    <p>{}</p>\n", Self::escape_html(paragraph)));
        }
        if let Some(src) = &section.image_src {
            html.push_str(&format!(
                "    <img src=\"{}\" alt=\"{}\">\n",
                Self::escape_html(src),
                Self::escape_html(&section.heading)
            ));
        }

        html
    }

    /// Generate complete HTML document
    pub fn to_html(&self, summary: Option<&ReportSummary<'_>>) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!(
            "    <title>{}</title>\n",
            Self::escape_html(&self.title)
        ));
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <h1>COVID-19 Data Analysis</h1>\n");

        for section in &self.sections {
            html.push_str(&Self::render_section(section));
        }

        if let Some(summary) = summary {
            html.push_str(&Self::render_fit_summary(summary.analysis));
            html.push_str(&Self::render_ranking(summary.ranked, summary.analysis));
        }

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by incidence-report\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }

    fn render_fit_summary(analysis: &Analysis) -> String {
        let fit = &analysis.regression.fit;
        let dist = &analysis.distribution;
        let mut html = String::new();

        html.push_str("    <h2>Model Summary</h2>\n");
        html.push_str("    <table class=\"fit-table\">\n");
        html.push_str("        <tr><th>Quantity</th><th>Value</th></tr>\n");
        for (name, value) in [
            ("Slope (cases per 100k per inhabitant)", format!("{:.6e}", fit.slope)),
            ("Intercept (cases per 100k)", format!("{:.4}", fit.intercept)),
            ("R²", format!("{:.4}", fit.r_squared)),
            ("Residual mean", format!("{:.4}", dist.mean)),
            ("Residual standard deviation", format!("{:.4}", dist.std_dev)),
        ] {
            html.push_str(&format!(
                "        <tr><td>{}</td><td class=\"number\">{}</td></tr>\n",
                Self::escape_html(name),
                value
            ));
        }
        html.push_str("    </table>\n");

        html
    }

    fn render_ranking(ranked: &[RankedEntity], analysis: &Analysis) -> String {
        let mut html = String::new();

        html.push_str("    <h2>Ranked Countries</h2>\n");
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>#</th><th>Code</th><th>Country</th><th>Population</th><th>Avg new cases</th><th>Cases per 100k</th><th>Fitted</th><th>Residual</th></tr>\n");

        for (entity, point) in ranked.iter().zip(&analysis.regression.points) {
            html.push_str(&format!(
                "        <tr><td>{}</td><td class=\"code\">{}</td><td>{}</td><td class=\"number\">{:.0}</td><td class=\"number\">{:.2}</td><td class=\"number\">{:.2}</td><td class=\"number\">{:.2}</td><td class=\"number\">{:.2}</td></tr>\n",
                entity.rank,
                Self::escape_html(&entity.code),
                Self::escape_html(&entity.name),
                entity.population,
                entity.avg_new_cases,
                entity.cases_per_100k,
                point.fitted,
                point.residual
            ));
        }

        html.push_str("    </table>\n");

        html
    }
}

/// The four chart sections, with narrative text filled from the analysis
///
/// `image_src` maps each chart to its path relative to the report.
pub fn standard_sections(
    image_src: impl Fn(ChartKind) -> String,
    ranked: &[RankedEntity],
    analysis: &Analysis,
) -> Vec<ReportSection> {
    let fit = &analysis.regression.fit;
    let count = ranked.len();

    vec![
        ReportSection {
            heading: format!("1. Population and Weekly Incidence (Top {count} Countries)"),
            paragraphs: vec![
                "The left chart shows the total population of the selected countries. The right \
                 chart shows the average number of new COVID-19 cases over the last seven \
                 reported days, normalized per 100,000 inhabitants."
                    .to_string(),
                "A large population does not by itself imply a high infection rate, which is why \
                 indicators normalized to population size are the ones worth monitoring."
                    .to_string(),
            ],
            image_src: Some(image_src(ChartKind::BarCharts)),
        },
        ReportSection {
            heading: "2. Relationship Between Population Size and COVID-19 Incidence".to_string(),
            paragraphs: vec![
                "Each point is one country: its population against its average number of new \
                 cases per 100,000 inhabitants, labeled with its ISO code."
                    .to_string(),
            ],
            image_src: Some(image_src(ChartKind::Scatter)),
        },
        ReportSection {
            heading: "3. Linear Regression Fit".to_string(),
            paragraphs: vec![format!(
                "An ordinary least squares line approximates incidence as a function of \
                 population: slope {:.3e} cases per 100,000 per inhabitant, intercept {:.2}. \
                 The coefficient of determination is R² = {:.3}.",
                fit.slope, fit.intercept, fit.r_squared
            )],
            image_src: Some(image_src(ChartKind::LinearFit)),
        },
        ReportSection {
            heading: "4. Residual Analysis".to_string(),
            paragraphs: vec![format!(
                "The histogram shows the differences between observed incidence and the values \
                 predicted by the regression. The overlaid curve is a normal distribution fitted \
                 to the residuals (mean {:.2}, standard deviation {:.2}), a check on the \
                 normality assumption of linear regression.",
                analysis.distribution.mean, analysis.distribution.std_dev
            )],
            image_src: Some(image_src(ChartKind::Residuals)),
        },
    ]
}
