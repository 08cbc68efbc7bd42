use crate::domain::model::{AnalysisResult, CleanedTable, RawRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Chart tuning shared by configuration sources and the visualizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    /// Rows heavier than this (grams) are left out of the histogram.
    pub histogram_mass_cap: f64,
    pub histogram_bins: usize,
    pub year_label_step: usize,
    pub kde_points: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            histogram_mass_cap: 100_000.0,
            histogram_bins: 100,
            year_label_step: 5,
            kde_points: 200,
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn output_dir(&self) -> &Path;
    fn request_timeout(&self) -> Option<Duration>;
    fn chart_settings(&self) -> &ChartSettings;
}

/// The four report stages. Only fetching touches the network; the rest are
/// synchronous transformations over owned or borrowed data.
#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Soft-fails: an empty result means the fetch did not succeed.
    async fn fetch(&self) -> Vec<RawRecord>;
    fn clean(&self, records: Vec<RawRecord>) -> CleanedTable;
    fn analyze(&self, table: &CleanedTable) -> AnalysisResult;
    fn visualize(&self, table: &CleanedTable) -> Result<Vec<PathBuf>>;
}
