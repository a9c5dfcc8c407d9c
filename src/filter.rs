//! Record filtering ahead of aggregation
//!
//! Keeps country rows only and drops anything incomplete:
//! - Aggregate entities ("World", "Europe", income groups) carry `OWID_*`
//!   codes and are excluded by requiring a 3-character code
//! - Rows without a date, new-case count or population are dropped
//!
//! None of these drops are errors; they are the expected shape of the data.

use crate::observation::{Observation, RawObservation};

/// Length of an ISO 3166-1 alpha-3 country code
pub const COUNTRY_CODE_LEN: usize = 3;

/// Whether a code identifies a single country rather than an aggregate
pub fn is_country_code(code: &str) -> bool {
    code.chars().count() == COUNTRY_CODE_LEN
}

/// Convert a raw row into a complete observation, if it qualifies
pub fn qualify(raw: &RawObservation) -> Option<Observation> {
    if !is_country_code(&raw.code) {
        return None;
    }

    let date = raw.date?;
    let new_cases = raw.new_cases.filter(|v| v.is_finite())?;
    let population = raw.population.filter(|v| v.is_finite())?;

    Some(Observation {
        code: raw.code.clone(),
        name: raw.name.clone(),
        date,
        new_cases,
        population,
    })
}

/// Filter raw rows down to complete country observations, preserving order
pub fn filter_observations(raw: &[RawObservation]) -> Vec<Observation> {
    let filtered: Vec<Observation> = raw.iter().filter_map(qualify).collect();

    tracing::info!(
        "Filtered {} rows down to {} country observations",
        raw.len(),
        filtered.len()
    );
    tracing::debug!("Dropped {} aggregate or incomplete rows", raw.len() - filtered.len());

    filtered
}
