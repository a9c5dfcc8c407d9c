//! Daily case observations as read from the dataset and after filtering

use chrono::NaiveDate;

/// One dataset row, before any quality filtering
///
/// Numeric cells that were empty or unparseable are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawObservation {
    /// ISO 3166-1 alpha-3 code, or a longer `OWID_*` code for aggregates
    pub code: String,
    /// Human-readable entity name ("Germany", "World", ...)
    pub name: String,
    pub date: Option<NaiveDate>,
    pub new_cases: Option<f64>,
    pub population: Option<f64>,
}

/// A country observation with every required value present
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub code: String,
    pub name: String,
    pub date: NaiveDate,
    pub new_cases: f64,
    pub population: f64,
}
