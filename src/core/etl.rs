use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

/// Drives one run through its phases: load the table, annotate it, write it.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting color annotation run...");
        self.monitor.log_stats("Start");

        // Loaded
        let table = self.pipeline.extract().await?;
        self.monitor.log_stats("Loaded");

        // Iterating
        let result = self.pipeline.transform(table).await?;
        self.monitor.log_stats("Annotated");

        // Written
        let output_path = self.pipeline.load(result).await?;
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
