// Normal distribution fit of regression residuals
//
// Maximum-likelihood estimates: the sample mean and the population standard
// deviation (divisor n, not n - 1). The fitted density is sampled over the
// residual range for the histogram overlay.

use std::f64::consts::PI;

/// Normal distribution fitted to a residual set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualDistribution {
    pub mean: f64,
    /// Population standard deviation (MLE)
    pub std_dev: f64,
}

/// One sample of the fitted density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

impl ResidualDistribution {
    /// Fit by maximum likelihood
    ///
    /// An empty residual set has no spread: mean and standard deviation are
    /// both zero and there is no density.
    pub fn fit(residuals: &[f64]) -> Self {
        if residuals.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
            };
        }

        let n = residuals.len() as f64;
        let mean = residuals.iter().sum::<f64>() / n;
        let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Whether the distribution has a usable density (positive, finite spread)
    pub fn has_density(&self) -> bool {
        self.std_dev > 0.0 && self.std_dev.is_finite()
    }

    /// Probability density at `x`
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        (-0.5 * z * z).exp() / (self.std_dev * (2.0 * PI).sqrt())
    }

    /// Sample the density at `points` evenly spaced values over `[min, max]`
    ///
    /// Empty when the spread is zero, since the density is then undefined.
    pub fn density_curve(&self, min: f64, max: f64, points: usize) -> Vec<DensityPoint> {
        if !self.has_density() || points == 0 {
            return Vec::new();
        }

        linspace(min, max, points)
            .into_iter()
            .map(|x| DensityPoint {
                x,
                density: self.pdf(x),
            })
            .collect()
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_uses_population_std_dev() {
        // mean = 5, squared deviations sum to 20, n = 4
        let dist = ResidualDistribution::fit(&[2.0, 4.0, 6.0, 8.0]);
        assert!((dist.mean - 5.0).abs() < 1e-12);
        assert!((dist.std_dev - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_fit_empty() {
        let dist = ResidualDistribution::fit(&[]);
        assert_eq!(dist.mean, 0.0);
        assert_eq!(dist.std_dev, 0.0);
        assert!(!dist.has_density());
    }

    #[test]
    fn test_pdf_standard_normal_peak() {
        let dist = ResidualDistribution {
            mean: 0.0,
            std_dev: 1.0,
        };
        assert!((dist.pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-12);
        assert!((dist.pdf(1.0) - dist.pdf(-1.0)).abs() < 1e-15);
    }

    #[test]
    fn test_density_curve_spans_range() {
        let dist = ResidualDistribution {
            mean: 0.0,
            std_dev: 2.0,
        };
        let curve = dist.density_curve(-3.0, 5.0, 100);

        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0].x, -3.0);
        assert_eq!(curve[99].x, 5.0);
        assert!(curve.windows(2).all(|w| w[0].x < w[1].x));
    }

    #[test]
    fn test_density_curve_empty_without_spread() {
        let dist = ResidualDistribution::fit(&[1.5, 1.5, 1.5]);
        assert!(!dist.has_density());
        assert!(dist.density_curve(1.5, 1.5, 100).is_empty());
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
