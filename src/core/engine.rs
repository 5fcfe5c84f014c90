use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives a [`Pipeline`] through its three stages and reports progress.
pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting pair analysis...");

        println!("Reading work periods...");
        let records = self.pipeline.extract().await?;
        println!("Loaded {} work periods", records.len());
        self.monitor.log_stats("Extract");

        if records.is_empty() {
            println!("No valid data found in the input file.");
        }

        println!("Computing pair overlaps...");
        let result = self.pipeline.transform(records).await?;
        println!("Found {} overlapping pairs", result.ranked.len());
        self.monitor.log_stats("Transform");

        println!("Writing report...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
