// Regression and residual analysis over the ranked incidence table
//
// Treats the ranked countries as paired samples (population, cases per 100k):
// - Ordinary least squares fit of incidence against population
// - Fitted value and residual (observed - fitted) per country
// - Maximum-likelihood normal fit of the residuals
// - Density samples of that normal for the residual histogram overlay
//
// Degenerate inputs (fewer than two countries, identical populations) are
// reported as errors instead of producing NaN-filled results.

mod config;
mod ols;
mod residuals;

pub use config::AnalysisConfig;
pub use ols::{fit_line, LinearFit};
pub use residuals::{linspace, DensityPoint, ResidualDistribution};

use crate::rank::RankedEntity;
use thiserror::Error;

/// Reasons the regression cannot be computed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Degenerate regression: need at least {required} ranked countries, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("Degenerate regression: all ranked countries have the same population")]
    ZeroVariance,

    #[error("Mismatched samples: {xs} x values but {ys} y values")]
    LengthMismatch { xs: usize, ys: usize },
}

/// Fitted value and residual for one ranked country
#[derive(Debug, Clone, PartialEq)]
pub struct FittedPoint {
    pub code: String,
    /// Predictor (population)
    pub x: f64,
    /// Observed cases per 100k
    pub observed: f64,
    pub fitted: f64,
    /// `observed - fitted`
    pub residual: f64,
}

/// Line fit plus per-country fitted values and residuals
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionResult {
    pub fit: LinearFit,
    /// One entry per ranked country, in rank order
    pub points: Vec<FittedPoint>,
}

impl RegressionResult {
    pub fn residuals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.residual).collect()
    }
}

/// Complete output of the analysis stage
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub regression: RegressionResult,
    pub distribution: ResidualDistribution,
    /// Empty when the residuals have no spread
    pub density: Vec<DensityPoint>,
}

/// Regress incidence on population for the ranked countries
pub fn regress(ranked: &[RankedEntity]) -> Result<RegressionResult, AnalysisError> {
    let xs: Vec<f64> = ranked.iter().map(|r| r.population).collect();
    let ys: Vec<f64> = ranked.iter().map(|r| r.cases_per_100k).collect();

    let fit = fit_line(&xs, &ys)?;

    let points = ranked
        .iter()
        .map(|r| {
            let fitted = fit.predict(r.population);
            FittedPoint {
                code: r.code.clone(),
                x: r.population,
                observed: r.cases_per_100k,
                fitted,
                residual: r.cases_per_100k - fitted,
            }
        })
        .collect();

    Ok(RegressionResult { fit, points })
}

/// Run the full analysis: regression, residual normal fit, density samples
pub fn analyze(
    ranked: &[RankedEntity],
    config: &AnalysisConfig,
) -> Result<Analysis, AnalysisError> {
    let regression = regress(ranked)?;
    let residuals = regression.residuals();

    let distribution = ResidualDistribution::fit(&residuals);

    let (min, max) = residuals
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
            (lo.min(r), hi.max(r))
        });

    let density = distribution.density_curve(min, max, config.density_points);
    if density.is_empty() {
        tracing::warn!("Residuals have no spread; omitting the normal density overlay");
    }

    tracing::info!(
        "Fitted cases_per_100k = {:.6e}·population + {:.4} (R² = {:.4}, residual σ = {:.4})",
        regression.fit.slope,
        regression.fit.intercept,
        regression.fit.r_squared,
        distribution.std_dev
    );

    Ok(Analysis {
        regression,
        distribution,
        density,
    })
}
