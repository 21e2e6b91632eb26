#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_headers, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url,
};

pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("api_base_url", config.api_base_url())?;
    validate_non_empty_string("engagement_method", config.engagement_method())?;
    validate_positive_number("concurrent_requests", config.concurrent_requests(), 1)?;
    validate_range(
        "timeout_seconds",
        config.timeout().as_secs(),
        1,
        MAX_TIMEOUT_SECONDS,
    )?;
    validate_headers("headers", &config.headers())?;
    Ok(())
}
