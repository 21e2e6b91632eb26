use crate::core::client::ApiClient;
use crate::domain::model::{EngagementMethod, PoliceForce};
use crate::domain::ports::ForceSource;
use crate::utils::error::{PoliceApiError, Result};
use async_trait::async_trait;
use serde_json::Value;

pub const FORCES_PATH: &str = "/forces";

pub fn force_path(force_id: &str) -> String {
    format!("{}/{}", FORCES_PATH, force_id)
}

#[async_trait]
impl ForceSource for ApiClient {
    /// 取得所有警察單位
    async fn list_forces(&self) -> Result<Vec<PoliceForce>> {
        let body = self.get_json(FORCES_PATH).await?;

        let items = match body {
            Value::Array(items) => items,
            _ => return Err(PoliceApiError::unexpected_shape(FORCES_PATH, "an array of forces")),
        };

        let mut forces = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(data) => forces.push(PoliceForce::from(data)),
                _ => {
                    return Err(PoliceApiError::unexpected_shape(
                        FORCES_PATH,
                        "every force to be an object",
                    ))
                }
            }
        }

        tracing::debug!("Listed {} forces", forces.len());
        Ok(forces)
    }

    /// 取得指定警察單位的社群聯絡方式
    async fn engagement_methods(&self, force_id: &str) -> Result<Vec<EngagementMethod>> {
        let path = force_path(force_id);
        let body = self.get_json(&path).await?;

        let mut details = match body {
            Value::Object(details) => details,
            _ => return Err(PoliceApiError::unexpected_shape(path, "a force object")),
        };

        match details.remove("engagement_methods") {
            None | Some(Value::Null) => Err(PoliceApiError::missing_field(path, "engagement_methods")),
            Some(Value::Array(methods)) => {
                Ok(methods.into_iter().map(EngagementMethod::from).collect())
            }
            Some(_) => Err(PoliceApiError::unexpected_shape(
                path,
                "engagement_methods to be an array",
            )),
        }
    }
}
