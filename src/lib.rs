//! incidence-report - weekly COVID-19 incidence ranking and report generator
//!
//! This library reads a daily per-country case dataset, averages the most
//! recent week of new cases per country, ranks countries by cases per
//! 100,000 inhabitants, regresses incidence on population, and renders SVG
//! charts plus a static HTML report from the results.

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod config;
pub mod csv_output;
pub mod filter;
pub mod html_output;
pub mod ingest;
pub mod observation;
pub mod pipeline;
pub mod rank;
pub mod regression;
