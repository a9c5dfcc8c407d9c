//! Minimal SVG building blocks: document buffer, linear scales, axes

use std::fmt::Write as _;

pub const FONT_FAMILY: &str = "Arial, sans-serif";
pub const BAR_COLOR: &str = "#4a90d9";
pub const POINT_COLOR: &str = "#1f77b4";
pub const LINE_COLOR: &str = "#d62728";
pub const AXIS_COLOR: &str = "#333333";
pub const GRID_COLOR: &str = "#e5e7eb";
pub const LABEL_COLOR: &str = "#555555";

/// Escape text content and attribute values
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Compact tick label: 1.4B, 83.4M, 12.5k, 7, 0.25
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.1}k", value / 1e3)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else if abs >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Linear mapping from data values to pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Scale {
    /// A zero-width domain is widened by one unit each side
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (lo, hi) = domain;
        let domain = if hi > lo { (lo, hi) } else { (lo - 1.0, lo + 1.0) };
        Self { domain, range }
    }

    /// Domain over `values` extended by `pad` (a fraction of the span) each side
    pub fn padded(values: impl IntoIterator<Item = f64>, pad: f64, range: (f64, f64)) -> Self {
        let (lo, hi) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return Self::new((0.0, 1.0), range);
        }
        let margin = (hi - lo) * pad;
        Self::new((lo - margin, hi + margin), range)
    }

    /// Domain from zero (or the minimum, if negative) up to the maximum
    pub fn from_zero(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let (lo, hi) = values
            .into_iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self::new((lo, hi * 1.05), range)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Round tick values inside the domain, roughly `target` of them
    pub fn ticks(&self, target: usize) -> Vec<f64> {
        let (lo, hi) = self.domain;
        let raw_step = (hi - lo) / target.max(1) as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let step = [1.0, 2.0, 5.0, 10.0]
            .iter()
            .map(|m| m * magnitude)
            .find(|s| *s >= raw_step)
            .unwrap_or(10.0 * magnitude);

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Rectangular plotting region inside a document, in pixels
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn x_range(&self) -> (f64, f64) {
        (self.left, self.right())
    }

    /// Pixel y grows downwards, so the range is inverted
    pub fn y_range(&self) -> (f64, f64) {
        (self.bottom(), self.top)
    }
}

/// An SVG document under construction
#[derive(Debug)]
pub struct SvgDocument {
    width: u32,
    height: u32,
    body: String,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    fn push(&mut self, element: std::fmt::Arguments<'_>) {
        // Writing into a String cannot fail
        let _ = self.body.write_fmt(element);
        self.body.push('\n');
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str, opacity: f64) {
        self.push(format_args!(
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{}"/>"#,
            x, y, width, height, fill, opacity
        ));
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, stroke_width: f64) {
        self.push(format_args!(
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
            x1, y1, x2, y2, stroke, stroke_width
        ));
    }

    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.push(format_args!(
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
    }

    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: &str, stroke_width: f64) {
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{:.2},{:.2}", x, y))
            .collect();
        self.push(format_args!(
            r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            coords.join(" "),
            stroke,
            stroke_width
        ));
    }

    /// Text anchored at `(x, y)`; `rotate` is in degrees around the anchor
    pub fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        let transform = if style.rotate != 0.0 {
            format!(
                r#" transform="rotate({} {:.2} {:.2})""#,
                style.rotate, x, y
            )
        } else {
            String::new()
        };
        self.push(format_args!(
            r#"  <text x="{:.2}" y="{:.2}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{}"{}>{}</text>"#,
            x,
            y,
            FONT_FAMILY,
            style.size,
            if style.bold { "bold" } else { "normal" },
            style.color,
            style.anchor,
            transform,
            escape_text(content)
        ));
    }

    /// Title, axis lines, tick labels and axis labels around a plot area
    pub fn axes(&mut self, area: &PlotArea, x: Option<&Scale>, y: &Scale, labels: &AxisLabels<'_>) {
        self.text(
            area.left + area.width / 2.0,
            area.top - 20.0,
            labels.title,
            TextStyle::title(),
        );

        for tick in y.ticks(5) {
            let py = y.map(tick);
            self.line(area.left, py, area.right(), py, GRID_COLOR, 1.0);
            self.text(
                area.left - 8.0,
                py + 4.0,
                &format_value(tick),
                TextStyle::label().anchor("end"),
            );
        }

        if let Some(x) = x {
            for tick in x.ticks(6) {
                let px = x.map(tick);
                self.line(px, area.bottom(), px, area.bottom() + 5.0, AXIS_COLOR, 1.0);
                self.text(
                    px,
                    area.bottom() + 20.0,
                    &format_value(tick),
                    TextStyle::label(),
                );
            }
        }

        self.line(area.left, area.bottom(), area.right(), area.bottom(), AXIS_COLOR, 1.5);
        self.line(area.left, area.top, area.left, area.bottom(), AXIS_COLOR, 1.5);

        if let Some(x_label) = labels.x {
            self.text(
                area.left + area.width / 2.0,
                area.bottom() + 45.0,
                x_label,
                TextStyle::axis(),
            );
        }

        let y_center = area.top + area.height / 2.0;
        self.text(
            area.left - 65.0,
            y_center,
            labels.y,
            TextStyle::axis().rotate(-90.0),
        );
    }

    /// Close the document
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Title and axis captions for one plot
#[derive(Debug, Clone, Copy)]
pub struct AxisLabels<'a> {
    pub title: &'a str,
    pub x: Option<&'a str>,
    pub y: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: u32,
    pub bold: bool,
    pub color: &'static str,
    pub anchor: &'static str,
    pub rotate: f64,
}

impl TextStyle {
    pub fn title() -> Self {
        Self {
            size: 16,
            bold: true,
            color: AXIS_COLOR,
            anchor: "middle",
            rotate: 0.0,
        }
    }

    pub fn axis() -> Self {
        Self {
            size: 13,
            bold: false,
            color: AXIS_COLOR,
            anchor: "middle",
            rotate: 0.0,
        }
    }

    pub fn label() -> Self {
        Self {
            size: 11,
            bold: false,
            color: LABEL_COLOR,
            anchor: "middle",
            rotate: 0.0,
        }
    }

    pub fn anchor(self, anchor: &'static str) -> Self {
        Self { anchor, ..self }
    }

    pub fn rotate(self, rotate: f64) -> Self {
        Self { rotate, ..self }
    }
}
