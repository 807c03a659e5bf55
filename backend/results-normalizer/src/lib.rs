//! Normalization of candidate test results for display.
//!
//! Raw submissions from the results API arrive in many shapes. The
//! [`services::normalizer`] turns each one into a [`models::NormalizedResponse`],
//! and [`services::aggregator`] reduces final-test entries into totals.

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use error::FetchError;
pub use models::{NormalizedResponse, QuestionType, RawSubmission};
pub use services::{normalize, normalize_all, ResultsService};
