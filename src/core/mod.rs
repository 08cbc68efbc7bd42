pub mod analyze;
pub mod chart_data;
pub mod clean;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod visualize;

pub use crate::domain::model::{AnalysisResult, CleanedTable, FieldValue, MeteoriteRow, RawRecord};
pub use crate::domain::ports::{ChartSettings, ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
