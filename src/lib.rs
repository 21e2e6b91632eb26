pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{
    client::{ApiClient, ClientSettings},
    engine::SearchEngine,
    filter::ForceFilter,
    pipeline::EngagementPipeline,
    predicate::{has_social_engagement_method, matches_engagement_method},
    report::OutputFormat,
};
pub use domain::model::{EngagementMethod, PoliceForce, SearchOutcome};
pub use domain::ports::{ConfigProvider, ForceSource, Pipeline};
pub use utils::error::{PoliceApiError, Result};
