//! Descriptive statistics over ENADE student questionnaire results.
//!
//! The questionnaire summary is loaded once into a [`survey::SurveyTable`]; filters derive
//! borrowed row subsets and the [`analysis`] functions aggregate them. [`snapshot`]
//! precomputes the aggregates for the benchmark institution and [`api`] serves both the
//! snapshot and live queries over HTTP.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod survey;
pub mod telemetry;
