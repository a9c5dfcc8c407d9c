//! Density-normalized histogram binning
//!
//! Equal-width bins over `[min, max]`; the last bin is closed so the maximum
//! is counted. A set with no spread is binned over `[v - 0.5, v + 0.5]`.
//! Bar heights are densities, so the bar areas sum to one and the histogram
//! shares a y axis with a probability density curve.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// `count / (n * width)`
    pub density: f64,
}

pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if hi <= lo {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let n = values.len() as f64;
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lo + width * i as f64,
            end: if i == bins - 1 { hi } else { lo + width * (i + 1) as f64 },
            count,
            density: count as f64 / (n * width),
        })
        .collect()
}
