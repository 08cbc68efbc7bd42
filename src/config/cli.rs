use crate::config::ReportConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "meteorite-report")]
#[command(about = "Fetch the NASA meteorite landings dataset, summarize it and chart it")]
pub struct CliArgs {
    /// TOML configuration file; command-line flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dataset endpoint returning a JSON array of records
    #[arg(long)]
    pub api_endpoint: Option<String>,

    /// Directory the chart images are written to
    #[arg(long)]
    pub output_path: Option<PathBuf>,

    /// Also write the summary as JSON to this file
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// HTTP request timeout in seconds (client default when unset)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliArgs {
    /// Defaults, then the config file, then explicit flags.
    pub fn into_config(self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                ReportConfig::from_file(path)?
            }
            None => ReportConfig::default(),
        };

        if let Some(endpoint) = self.api_endpoint {
            config.source.endpoint = endpoint;
        }
        if let Some(dir) = self.output_path {
            config.output.dir = dir;
        }
        if let Some(summary) = self.summary_json {
            config.output.summary_json = Some(summary);
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = Some(timeout);
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }

        Ok(config)
    }
}
