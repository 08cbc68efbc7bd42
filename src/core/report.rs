use crate::domain::model::AnalysisResult;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use std::path::{Path, PathBuf};

/// How a report run ended. The two early exits are not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    NoData,
    EmptyAfterCleaning,
    Completed {
        summary: AnalysisResult,
        charts: Vec<PathBuf>,
    },
}

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&mut self) -> Result<RunOutcome> {
        println!("Fetching data...");
        let raw_data = self.pipeline.fetch().await;
        self.monitor.log_stats("Fetch");
        if raw_data.is_empty() {
            println!("No data was fetched. Exiting.");
            return Ok(RunOutcome::NoData);
        }

        println!("Cleaning data...");
        let table = self.pipeline.clean(raw_data);
        self.monitor.log_stats("Clean");
        if table.is_empty() {
            println!("The dataset is empty after cleaning. Exiting.");
            return Ok(RunOutcome::EmptyAfterCleaning);
        }
        tracing::info!("{} rows survived cleaning", table.len());

        println!("Analyzing data...");
        let summary = self.pipeline.analyze(&table);
        self.monitor.log_stats("Analyze");

        println!("\n{}", summary);

        println!("\nCreating visualizations...");
        let charts = self.pipeline.visualize(&table)?;
        self.monitor.log_stats("Visualize");
        for chart in &charts {
            tracing::info!("📁 Chart saved to: {}", chart.display());
        }

        self.monitor.log_final_stats();
        Ok(RunOutcome::Completed { summary, charts })
    }
}

/// Writes the summary as pretty-printed JSON, creating parent directories.
pub fn write_summary_json(summary: &AnalysisResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}
