use crate::core::client::{ApiClient, ClientSettings};
use crate::core::filter::ForceFilter;
use crate::core::report;
use crate::core::{ConfigProvider, ForceSource, Pipeline, PoliceForce};
use crate::utils::error::Result;

/// extract: list forces, transform: keep those with the configured
/// engagement method, load: render the report.
pub struct EngagementPipeline<S: ForceSource, C: ConfigProvider> {
    filter: ForceFilter<S>,
    config: C,
}

impl<S: ForceSource, C: ConfigProvider> EngagementPipeline<S, C> {
    pub fn new(source: S, config: C) -> Self {
        let filter = ForceFilter::new(source).with_concurrency(config.concurrent_requests());
        Self { filter, config }
    }
}

impl<C: ConfigProvider> EngagementPipeline<ApiClient, C> {
    /// Build the HTTP client from the same configuration.
    pub fn from_config(config: C) -> Result<Self> {
        let client = ApiClient::new(ClientSettings::from_config(&config))?;
        Ok(Self::new(client, config))
    }
}

#[async_trait::async_trait]
impl<S: ForceSource, C: ConfigProvider> Pipeline for EngagementPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<PoliceForce>> {
        tracing::debug!("Listing forces from {}", self.config.api_base_url());
        self.filter.source().list_forces().await
    }

    async fn transform(&self, forces: Vec<PoliceForce>) -> Result<Vec<PoliceForce>> {
        self.filter
            .retain_with_engagement_method(forces, self.config.engagement_method())
            .await
    }

    async fn load(&self, forces: &[PoliceForce]) -> Result<String> {
        tracing::debug!(
            "Rendering {} forces as {:?}",
            forces.len(),
            self.config.output_format()
        );
        report::render(forces, self.config.output_format())
    }

    fn engagement_method(&self) -> &str {
        self.config.engagement_method()
    }
}
