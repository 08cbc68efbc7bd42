use crate::core::{analyze, clean, fetch, visualize};
use crate::domain::model::{AnalysisResult, CleanedTable, RawRecord};
use crate::domain::ports::{ConfigProvider, Pipeline};
use crate::utils::error::Result;
use reqwest::Client;
use std::path::PathBuf;

pub struct MeteoritePipeline<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> MeteoritePipeline<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for MeteoritePipeline<C> {
    async fn fetch(&self) -> Vec<RawRecord> {
        fetch::fetch(&self.client, self.config.api_endpoint()).await
    }

    fn clean(&self, records: Vec<RawRecord>) -> CleanedTable {
        clean::clean(records)
    }

    fn analyze(&self, table: &CleanedTable) -> AnalysisResult {
        analyze::analyze(table)
    }

    fn visualize(&self, table: &CleanedTable) -> Result<Vec<PathBuf>> {
        visualize::visualize(
            table,
            self.config.chart_settings(),
            self.config.output_dir(),
        )
    }
}
