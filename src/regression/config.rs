// Configuration for the regression and residual analysis
//
// Only the presentational byproducts are tunable; the fit itself is plain
// ordinary least squares with no knobs.

use serde::{Deserialize, Serialize};

/// Configuration for residual analysis output
///
/// # Example
/// ```
/// use incidence_report::regression::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.density_points, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of evenly spaced samples of the fitted normal density
    ///
    /// Samples span `[min(residual), max(residual)]` inclusive.
    ///
    /// Default: 100
    pub density_points: usize,

    /// Number of equal-width bins in the residual histogram
    ///
    /// Default: 10
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            density_points: 100,
            histogram_bins: 10,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.density_points < 2 {
            return Err(format!(
                "density_points must be >= 2 to span the residual range, got {}",
                self.density_points
            ));
        }

        if self.histogram_bins == 0 {
            return Err("histogram_bins must be >= 1, got 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.density_points, 100);
        assert_eq!(config.histogram_bins, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_density_points() {
        let mut config = AnalysisConfig::default();
        config.density_points = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_histogram_bins() {
        let mut config = AnalysisConfig::default();
        config.histogram_bins = 0;
        assert!(config.validate().is_err());
    }
}
