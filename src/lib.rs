//! # Spam Detection Tester
//!
//! Drives an external spam detection service over HTTP with a fixed set of
//! sample posts and prints what the service decided for each one.
//!
//! The service itself lives elsewhere. This crate only consumes its endpoints:
//!
//! - `GET /health` - liveness, a failure aborts the run
//! - `GET /ai-status` - whether AI analysis is enabled and connected
//! - `POST /validate-post` - classification of a single post
//! - `GET /config` and `GET /blocked-ips` - dumped with `--inspect`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spam_detection_tester::{TestRunner, TesterConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TesterConfig::default().with_base_url("http://localhost:3000")?;
//!     let mut runner = TestRunner::new(config, std::io::stdout())?;
//!     let outcome = runner.run_all().await?;
//!     std::process::exit(outcome.exit_code());
//! }
//! ```

pub mod client;
pub mod config;
pub mod models;
pub mod report;
pub mod runner;
pub mod samples;

#[cfg(test)]
mod runner_tests;

pub use client::ServiceClient;
pub use config::TesterConfig;
pub use models::{
    Action, AiAnalysis, AiStatus, Detection, ErrorBody, ModelInfo, RequestResult, ResponseBody,
    SamplePost, ValidatePostRequest, ValidationResponse,
};
pub use runner::{RunOutcome, TestRunner};
pub use samples::SAMPLE_POSTS;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the service under test
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Timeout: request took longer than {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

// Timeouts are classified by `ServiceClient`, which knows the configured limit
impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() {
            Error::Network {
                message: format!("Connection failed: {}", error),
            }
        } else {
            Error::Network {
                message: error.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Error::Configuration {
            message: format!("Invalid URL: {}", error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Parse {
            message: format!("JSON parse error: {}", error),
        }
    }
}
