// In-memory farm repository backed by a JSON dataset file
use crate::application::farm_repository::FarmRepository;
use crate::domain::farm::FarmMetadata;
use crate::domain::series::{IntervalSeries, RawIntervalSeries};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    farms: Option<Vec<String>>,
    data: HashMap<String, RawIntervalSeries>,
    #[serde(default)]
    meta: HashMap<String, FarmMetadata>,
}

#[derive(Debug, Clone)]
struct FarmRecord {
    series: Arc<IntervalSeries>,
    metadata: Arc<FarmMetadata>,
}

/// Dataset loaded once at startup and never mutated
#[derive(Debug, Clone)]
pub struct JsonDatasetRepository {
    order: Vec<String>,
    farms: HashMap<String, FarmRecord>,
}

impl JsonDatasetRepository {
    pub async fn load(path: &str) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read dataset file {}", path))?;

        let repository = Self::from_json(&json)
            .with_context(|| format!("Failed to parse dataset file {}", path))?;

        tracing::info!(
            "Loaded dataset {} with {} farms",
            path,
            repository.order.len()
        );
        Ok(repository)
    }

    /// Parse a dataset document. Farms whose series break an invariant are
    /// skipped with a warning instead of failing the whole load.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(json)?;
        let mut meta = file.meta;

        let order = match file.farms {
            Some(order) => order,
            None => {
                let mut names: Vec<String> = file.data.keys().cloned().collect();
                names.sort();
                names
            }
        };

        let mut raw_data = file.data;
        let mut farms = HashMap::new();
        let mut kept = Vec::with_capacity(order.len());

        for name in order {
            let Some(raw) = raw_data.remove(&name) else {
                tracing::warn!("Farm {} is listed but has no series, skipping", name);
                continue;
            };

            match IntervalSeries::try_from(raw) {
                Ok(series) => {
                    tracing::debug!("Farm {}: {} samples", name, series.len());
                    let metadata = meta.remove(&name).unwrap_or_default();
                    farms.insert(
                        name.clone(),
                        FarmRecord {
                            series: Arc::new(series),
                            metadata: Arc::new(metadata),
                        },
                    );
                    kept.push(name);
                }
                Err(e) => {
                    tracing::warn!("Skipping farm {}: {}", name, e);
                }
            }
        }

        for name in raw_data.keys() {
            tracing::warn!("Farm {} has a series but is not listed, skipping", name);
        }

        Ok(Self { order: kept, farms })
    }
}

#[async_trait]
impl FarmRepository for JsonDatasetRepository {
    async fn list_farm_names(&self) -> Result<Vec<String>> {
        Ok(self.order.clone())
    }

    async fn get_series(&self, farm: &str) -> Result<Option<Arc<IntervalSeries>>> {
        Ok(self.farms.get(farm).map(|record| record.series.clone()))
    }

    async fn get_metadata(&self, farm: &str) -> Result<Arc<FarmMetadata>> {
        Ok(self
            .farms
            .get(farm)
            .map(|record| record.metadata.clone())
            .unwrap_or_default())
    }
}
