//! Per-country weekly aggregation
//!
//! Each country's observations are ordered by date and the most recent
//! `window` of them are averaged. Population and name are taken from the
//! chronologically latest observation in the window, never averaged.

use crate::observation::Observation;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Default number of trailing observations averaged per country
pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// One country's trailing-window summary
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySummary {
    pub code: String,
    pub name: String,
    /// Mean daily new cases over the window
    pub avg_new_cases: f64,
    /// Population from the latest observation
    pub population: f64,
    /// Number of observations averaged (at most the window size)
    pub observations: usize,
    pub latest_date: NaiveDate,
}

/// Group observations by country and summarize the trailing window
///
/// Countries appear in the order of their first observation in the input,
/// which keeps downstream tie-breaking deterministic. A `window` of zero is
/// treated as one.
pub fn aggregate_weekly(observations: &[Observation], window: usize) -> Vec<WeeklySummary> {
    let window = window.max(1);

    let mut index_by_code: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Observation>> = Vec::new();

    for obs in observations {
        let idx = *index_by_code.entry(obs.code.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[idx].push(obs);
    }

    let summaries: Vec<WeeklySummary> = groups
        .into_iter()
        .filter_map(|mut group| {
            group.sort_by_key(|obs| obs.date);
            summarize_window(&group[group.len().saturating_sub(window)..])
        })
        .collect();

    tracing::info!(
        "Aggregated {} observations into {} country summaries (window = {})",
        observations.len(),
        summaries.len(),
        window
    );

    summaries
}

/// Summarize a date-ordered window; `None` for an empty window
fn summarize_window(window: &[&Observation]) -> Option<WeeklySummary> {
    let latest = window.last()?;
    let total: f64 = window.iter().map(|obs| obs.new_cases).sum();

    Some(WeeklySummary {
        code: latest.code.clone(),
        name: latest.name.clone(),
        avg_new_cases: total / window.len() as f64,
        population: latest.population,
        observations: window.len(),
        latest_date: latest.date,
    })
}
