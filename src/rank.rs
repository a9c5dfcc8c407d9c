//! Incidence ranking
//!
//! Incidence is new cases per 100,000 inhabitants. Countries are ranked by
//! descending incidence with a stable sort, so equal values keep the order in
//! which their summaries were produced.

use crate::aggregate::WeeklySummary;

/// Default number of countries kept after ranking
pub const DEFAULT_TOP_N: usize = 20;

/// Population base for the normalized rate
pub const PER_INHABITANTS: f64 = 100_000.0;

/// A country summary with its normalized incidence and rank
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntity {
    /// 1-based position in the ranking
    pub rank: usize,
    pub code: String,
    pub name: String,
    pub population: f64,
    pub avg_new_cases: f64,
    pub cases_per_100k: f64,
}

/// New cases per 100,000 inhabitants
///
/// Returns `None` for a non-positive population or a non-finite result; such
/// countries cannot be ranked.
pub fn cases_per_100k(avg_new_cases: f64, population: f64) -> Option<f64> {
    if population.is_nan() || population <= 0.0 {
        return None;
    }

    let rate = avg_new_cases / population * PER_INHABITANTS;
    rate.is_finite().then_some(rate)
}

/// Rank summaries by descending incidence and keep the first `top_n`
pub fn rank_by_incidence(summaries: &[WeeklySummary], top_n: usize) -> Vec<RankedEntity> {
    let mut scored: Vec<(&WeeklySummary, f64)> = summaries
        .iter()
        .filter_map(|summary| {
            match cases_per_100k(summary.avg_new_cases, summary.population) {
                Some(rate) => Some((summary, rate)),
                None => {
                    tracing::debug!(
                        "Excluding {} from ranking: population {}",
                        summary.code,
                        summary.population
                    );
                    None
                }
            }
        })
        .collect();

    // sort_by is stable: ties keep input order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_n);

    let ranked: Vec<RankedEntity> = scored
        .into_iter()
        .enumerate()
        .map(|(i, (summary, rate))| RankedEntity {
            rank: i + 1,
            code: summary.code.clone(),
            name: summary.name.clone(),
            population: summary.population,
            avg_new_cases: summary.avg_new_cases,
            cases_per_100k: rate,
        })
        .collect();

    tracing::info!(
        "Ranked {} of {} countries by cases per 100k",
        ranked.len(),
        summaries.len()
    );

    ranked
}
