pub mod app_config;
pub mod config;
pub mod location;
pub mod search;
pub mod snowflake;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use location::{Credentials, ExternalId, LocationRecord, QueryPoint};
pub use search::{SearchParams, DEFAULT_RADIUS};
pub use snowflake::{encode_date, max_id_suffix};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid latitude {0}: must be a finite number in [-90, 90]")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}: must be a finite number in [-180, 180]")]
    InvalidLongitude(f64),

    #[error("invalid radius {radius}: {reason}")]
    InvalidRadius { radius: i64, reason: String },

    #[error("unable to parse date \"{input}\" (expected YYYY-MM-DD): {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("date {0} cannot be encoded as a location max_id")]
    DateOutOfRange(String),
}
