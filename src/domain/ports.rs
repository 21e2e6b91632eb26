use crate::domain::model::{EngagementMethod, PoliceForce};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    /// Headers sent with every request.
    fn headers(&self) -> Vec<(String, String)>;
    fn timeout(&self) -> Duration;
    fn engagement_method(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn output_format(&self) -> crate::core::report::OutputFormat;
}

/// Read access to the force endpoints.
#[async_trait]
pub trait ForceSource: Send + Sync {
    async fn list_forces(&self) -> Result<Vec<PoliceForce>>;
    async fn engagement_methods(&self, force_id: &str) -> Result<Vec<EngagementMethod>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PoliceForce>>;
    async fn transform(&self, forces: Vec<PoliceForce>) -> Result<Vec<PoliceForce>>;
    async fn load(&self, forces: &[PoliceForce]) -> Result<String>;
    fn engagement_method(&self) -> &str;
}
