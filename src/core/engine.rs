use crate::core::{Pipeline, SearchOutcome};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<SearchOutcome> {
        let method = self.pipeline.engagement_method().to_string();
        tracing::info!("🚀 Searching police forces for '{}'", method);

        // Extract
        let forces = self.pipeline.extract().await?;
        let forces_listed = forces.len();
        tracing::info!("📥 Listed {} forces", forces_listed);
        self.monitor.log_phase("List forces");

        // Transform
        let matching_forces = self.pipeline.transform(forces).await?;
        self.monitor.log_phase("Filter forces");

        // Load
        let report = self.pipeline.load(&matching_forces).await?;
        self.monitor.log_phase("Render report");
        self.monitor.log_final();

        Ok(SearchOutcome {
            engagement_method: method,
            forces_listed,
            matching_forces,
            report,
        })
    }
}
