// Ordinary least squares for a single predictor
//
// Closed-form solution over centered sums:
//   slope     = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//   intercept = ȳ - slope·x̄
// Centering keeps the fit accurate when x is a population in the billions
// and y is a rate in the hundreds.

use crate::regression::AnalysisError;

/// A fitted line `y = slope·x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination (1.0 when y has no variance)
    pub r_squared: f64,
}

impl LinearFit {
    /// Value of the line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Observed minus fitted for each pair
    pub fn residuals(&self, xs: &[f64], ys: &[f64]) -> Vec<f64> {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| y - self.predict(x))
            .collect()
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Fit `y ≈ slope·x + intercept` by least squares
///
/// # Errors
/// - `LengthMismatch` when `xs` and `ys` differ in length
/// - `InsufficientSamples` when fewer than two pairs are given
/// - `ZeroVariance` when every x is identical, leaving the slope undefined
pub fn fit_line(xs: &[f64], ys: &[f64]) -> Result<LinearFit, AnalysisError> {
    if xs.len() != ys.len() {
        return Err(AnalysisError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
        });
    }

    let n = xs.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientSamples {
            required: 2,
            actual: n,
        });
    }

    if xs.iter().all(|&x| x == xs[0]) {
        return Err(AnalysisError::ZeroVariance);
    }

    let x_mean = mean(xs);
    let y_mean = mean(ys);

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - x_mean;
        let dy = y - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= 0.0 || !sxx.is_finite() {
        return Err(AnalysisError::ZeroVariance);
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let fit = LinearFit {
        slope,
        intercept,
        r_squared: 1.0,
    };

    let r_squared = if syy > 0.0 {
        let sse: f64 = fit.residuals(xs, ys).iter().map(|r| r * r).sum();
        1.0 - sse / syy
    } else {
        1.0
    };

    Ok(LinearFit { r_squared, ..fit })
}
