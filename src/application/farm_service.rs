// Farm service - Use case for listing farms
use crate::application::farm_repository::FarmRepository;
use crate::domain::farm::FarmSummary;
use std::sync::Arc;

#[derive(Clone)]
pub struct FarmService {
    repository: Arc<dyn FarmRepository>,
}

impl FarmService {
    pub fn new(repository: Arc<dyn FarmRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_farms(&self) -> anyhow::Result<Vec<FarmSummary>> {
        let names = self.repository.list_farm_names().await?;
        let mut farms = Vec::with_capacity(names.len());

        for name in names {
            match self.repository.get_series(&name).await? {
                Some(series) => farms.push(FarmSummary::new(name, &series)),
                None => tracing::warn!("Farm {} listed without a series", name),
            }
        }

        Ok(farms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::dataset_repository::tests::DATASET;
    use crate::infrastructure::dataset_repository::JsonDatasetRepository;

    #[tokio::test]
    async fn test_list_farms_with_spans() {
        let repo = Arc::new(JsonDatasetRepository::from_json(DATASET).unwrap());
        let farms = FarmService::new(repo).list_farms().await.unwrap();

        assert_eq!(farms.len(), 2);
        assert_eq!(farms[0].name, "Alcores");
        assert_eq!(farms[0].samples, 3);
        let span = farms[0].span.unwrap();
        assert_eq!(span.from.to_string(), "2024-06-01");
        assert_eq!(span.to.to_string(), "2024-06-02");
    }
}
