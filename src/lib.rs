//! Spoken-style daily weather reports.
//!
//! Fetches a one-day forecast from WeatherAPI.com and asks a local Ollama
//! model to summarise it. See [`app::run`] for the full interactive flow.

pub mod action_log;
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod models;
pub mod service;

pub use action_log::ActionLog;
pub use config::{Config, Timeouts};
pub use error::{AppError, DependencyUnavailable, GenerationError, WeatherFetchError};
pub use models::WeatherSummary;
pub use service::WeatherReporter;
