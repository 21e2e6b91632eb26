use crate::core::forces::FORCES_PATH;
use crate::core::predicate::has_social_engagement_method;
use crate::domain::model::PoliceForce;
use crate::domain::ports::ForceSource;
use crate::utils::error::{PoliceApiError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};

/// Keeps the forces that expose a given engagement method.
pub struct ForceFilter<S: ForceSource> {
    source: S,
    concurrent_requests: usize,
}

impl<S: ForceSource> ForceFilter<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            concurrent_requests: 1,
        }
    }

    /// Per-force lookups in flight at once. 1 means strictly sequential.
    pub fn with_concurrency(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// List every force, then keep the ones with `method`.
    pub async fn forces_with_engagement_method(&self, method: &str) -> Result<Vec<PoliceForce>> {
        let forces = self.source.list_forces().await?;
        self.retain_with_engagement_method(forces, method).await
    }

    /// Output order follows `forces`. The first failed lookup aborts the
    /// whole filter.
    pub async fn retain_with_engagement_method(
        &self,
        forces: Vec<PoliceForce>,
        method: &str,
    ) -> Result<Vec<PoliceForce>> {
        let total = forces.len();
        tracing::info!(
            "🔎 Checking {} forces for '{}' ({} concurrent)",
            total,
            method,
            self.concurrent_requests
        );

        let checked: Vec<(PoliceForce, bool)> = stream::iter(forces.into_iter().enumerate())
            .map(|(index, force)| async move {
                let force_id = force
                    .id()
                    .ok_or_else(|| PoliceApiError::missing_field(FORCES_PATH, "id"))?;
                tracing::debug!("📡 Force {}/{}: {}", index + 1, total, force_id);
                let keep = has_social_engagement_method(&self.source, &force_id, method).await?;
                Ok::<_, PoliceApiError>((force, keep))
            })
            // buffered (not buffer_unordered) keeps listing order
            .buffered(self.concurrent_requests)
            .try_collect()
            .await?;

        let matching: Vec<PoliceForce> = checked
            .into_iter()
            .filter_map(|(force, keep)| keep.then_some(force))
            .collect();

        tracing::info!("✅ {} of {} forces have '{}'", matching.len(), total, method);
        Ok(matching)
    }
}
