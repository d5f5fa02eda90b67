// Repository trait for farm dataset access
use crate::domain::farm::FarmMetadata;
use crate::domain::series::IntervalSeries;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait FarmRepository: Send + Sync {
    /// Farm names in display order
    async fn list_farm_names(&self) -> anyhow::Result<Vec<String>>;

    /// Full, unfiltered series of a farm; None if the farm is unknown
    async fn get_series(&self, farm: &str) -> anyhow::Result<Option<Arc<IntervalSeries>>>;

    /// Static metadata; farms without any get the empty default
    async fn get_metadata(&self, farm: &str) -> anyhow::Result<Arc<FarmMetadata>>;
}
