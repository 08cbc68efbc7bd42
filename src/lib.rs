pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;
pub use config::ReportConfig;

pub use crate::core::{
    pipeline::MeteoritePipeline,
    report::{write_summary_json, ReportEngine, RunOutcome},
};
pub use domain::model::{AnalysisResult, CleanedTable, FieldValue, MeteoriteRow, RawRecord};
pub use utils::error::{ReportError, Result};
