//! CSV ingestion of the daily case dataset
//!
//! The input follows the OWID `owid-covid-data.csv` layout. Only five columns
//! are read; any others are ignored. A missing required column aborts the
//! run, while bad numeric cells simply become `None` and are dropped later by
//! the record filter.

use crate::filter::is_country_code;
use crate::observation::RawObservation;
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: [&str; 5] = ["iso_code", "location", "date", "new_cases", "population"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that make the dataset unusable
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid date '{value}' on line {line} (expected YYYY-MM-DD)")]
    InvalidDate { line: u64, value: String },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    iso_code: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    date: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    new_cases: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    population: Option<f64>,
}

/// Load observations from a CSV file on disk
pub fn load_observations(path: &Path) -> Result<Vec<RawObservation>, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let observations = read_observations(file)?;

    tracing::info!(
        "Loaded {} rows from {}",
        observations.len(),
        path.display()
    );

    Ok(observations)
}

/// Parse observations from any CSV source
pub fn read_observations(reader: impl Read) -> Result<Vec<RawObservation>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut observations = Vec::new();
    for (index, result) in csv_reader.deserialize::<CsvRow>().enumerate() {
        // Header is line 1
        let line = index as u64 + 2;
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                tracing::trace!("skipping unreadable row on line {}: {}", line, e);
                continue;
            }
        };

        // Dates are only checked on rows the record filter could keep
        let date = if is_country_code(&row.iso_code)
            && row.new_cases.is_some()
            && row.population.is_some()
        {
            parse_date(&row.date, line)?
        } else {
            None
        };

        observations.push(RawObservation {
            date,
            code: row.iso_code,
            name: row.location,
            new_cases: row.new_cases,
            population: row.population,
        });
    }

    Ok(observations)
}

fn parse_date(value: &str, line: u64) -> Result<Option<NaiveDate>, IngestError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| IngestError::InvalidDate {
            line,
            value: value.to_string(),
        })
}
