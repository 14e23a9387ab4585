use std::sync::Arc;
use tracing::info;

use crate::config::{DataSourceConfig, DataSourceMode};
use crate::datasource::mock::DEFAULT_MOCK_SEED;
use crate::datasource::{DataSource, HttpDataSource, MockDataSource};
use crate::error::Result;

pub fn build_data_source(config: &DataSourceConfig) -> Result<Arc<dyn DataSource>> {
    match config.mode {
        DataSourceMode::Mock => {
            let seed = config.seed.unwrap_or(DEFAULT_MOCK_SEED);
            info!(seed, "using mock data source; figures are generated, not measured");
            Ok(Arc::new(MockDataSource::new(seed)))
        }
        DataSourceMode::Http => {
            info!(endpoint = %config.endpoint, "using reporting API data source");
            Ok(Arc::new(HttpDataSource::from_config(config)?))
        }
    }
}
