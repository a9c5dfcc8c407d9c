//! CSV output of the ranked incidence table
//!
//! One row per ranked country with its regression fitted value and residual,
//! for spreadsheet analysis alongside the HTML report.

use crate::rank::RankedEntity;
use crate::regression::FittedPoint;
use serde::Serialize;

/// CSV record for a single ranked country
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsvRankedRow {
    pub rank: usize,
    pub code: String,
    pub name: String,
    pub population: f64,
    pub avg_new_cases: f64,
    pub cases_per_100k: f64,
    pub fitted: f64,
    pub residual: f64,
}

impl CsvRankedRow {
    pub fn new(entity: &RankedEntity, point: &FittedPoint) -> Self {
        Self {
            rank: entity.rank,
            code: entity.code.clone(),
            name: entity.name.clone(),
            population: entity.population,
            avg_new_cases: entity.avg_new_cases,
            cases_per_100k: entity.cases_per_100k,
            fitted: point.fitted,
            residual: point.residual,
        }
    }
}

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput {
    rows: Vec<CsvRankedRow>,
}

impl CsvOutput {
    /// Build from a ranking and the matching regression points
    pub fn from_ranking(ranked: &[RankedEntity], points: &[FittedPoint]) -> Self {
        Self {
            rows: ranked
                .iter()
                .zip(points)
                .map(|(entity, point)| CsvRankedRow::new(entity, point))
                .collect(),
        }
    }

    /// Generate CSV output as string, header first
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
