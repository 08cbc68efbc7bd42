use clap::Parser;
use meteorite_report::domain::ports::ConfigProvider;
use meteorite_report::utils::{logger, validation::Validate};
use meteorite_report::{write_summary_json, CliArgs, MeteoritePipeline, ReportEngine, RunOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting meteorite-report");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match args.into_config().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Using endpoint {}", config.api_endpoint());

    let summary_path = config.output.summary_json.clone();
    let monitor_enabled = config.monitoring.enabled;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = MeteoritePipeline::new(config)?;
    let mut engine = ReportEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(RunOutcome::Completed { summary, charts }) => {
            if let Some(path) = summary_path {
                write_summary_json(&summary, &path)?;
                tracing::info!("📁 Summary saved to: {}", path.display());
            }
            tracing::info!("✅ Report completed with {} charts", charts.len());
        }
        Ok(outcome) => {
            tracing::warn!("Report stopped early: {:?}", outcome);
        }
        Err(e) => {
            tracing::error!("❌ Report failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
