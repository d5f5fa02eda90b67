// Dashboard service - Use case for building farm dashboards
use crate::application::farm_repository::FarmRepository;
use crate::domain::aggregation::Granularity;
use crate::domain::dashboard::{Dashboard, DashboardContext, DashboardSettings};
use crate::domain::energy::{compare_daily, FarmDailyEnergy};
use crate::domain::farm::MetadataPanel;
use crate::domain::series::{DateRange, IntervalSeries};
use crate::domain::view_state::{RangeSelection, ViewState};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown farm '{0}'")]
    UnknownFarm(String),
    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn FarmRepository>,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn FarmRepository>, settings: DashboardSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Resolve the selection against the farm's data and gather its inputs
    pub async fn context(
        &self,
        farm: &str,
        selection: RangeSelection,
        granularity: Granularity,
    ) -> Result<DashboardContext, DashboardError> {
        let full = self
            .repository
            .get_series(farm)
            .await?
            .ok_or_else(|| DashboardError::UnknownFarm(farm.to_string()))?;
        let metadata = self.repository.get_metadata(farm).await?;

        let range = selection.resolve(full.span());
        let view = ViewState::new(farm, range, granularity);
        tracing::debug!(
            "Dashboard view for {}: {}..={} at {}",
            farm,
            range.from,
            range.to,
            granularity
        );

        Ok(DashboardContext::new(view, full, metadata, self.settings))
    }

    pub async fn get_dashboard(
        &self,
        farm: &str,
        selection: RangeSelection,
        granularity: Granularity,
    ) -> Result<(Dashboard, MetadataPanel), DashboardError> {
        let context = self.context(farm, selection, granularity).await?;
        let comparison = self.compare(&context.view.range).await?;

        let dashboard = Dashboard::new(&context, comparison);
        let panel = metadata_panel(&context);

        Ok((dashboard, panel))
    }

    /// Daily totals of every farm within `range`
    pub async fn compare(&self, range: &DateRange) -> Result<Vec<FarmDailyEnergy>, DashboardError> {
        let names = self.repository.list_farm_names().await?;
        let mut farms: Vec<(String, Arc<IntervalSeries>)> = Vec::with_capacity(names.len());

        for name in names {
            if let Some(series) = self.repository.get_series(&name).await? {
                farms.push((name, series));
            }
        }

        Ok(compare_daily(
            farms.iter().map(|(name, series)| (name.as_str(), series.as_ref())),
            range,
        ))
    }
}

pub fn metadata_panel(context: &DashboardContext) -> MetadataPanel {
    MetadataPanel::new(&context.view.farm, &context.metadata, context.observed_peak())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dashboard::DashboardSection;
    use crate::infrastructure::dataset_repository::tests::DATASET;
    use crate::infrastructure::dataset_repository::JsonDatasetRepository;

    fn service() -> DashboardService {
        let repo = Arc::new(JsonDatasetRepository::from_json(DATASET).unwrap());
        DashboardService::new(repo, DashboardSettings::default())
    }

    #[tokio::test]
    async fn test_unknown_farm() {
        let err = service()
            .context("Nowhere", RangeSelection::All, Granularity::Native)
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::UnknownFarm(name) if name == "Nowhere"));
    }

    #[tokio::test]
    async fn test_last_days_preset() {
        let context = service()
            .context("Alcores", RangeSelection::LastDays(1), Granularity::Native)
            .await
            .unwrap();

        assert_eq!(context.view.range, DateRange::parse("2024-06-02", "2024-06-02").unwrap());
        assert_eq!(context.filtered.values(), &[30.0]);
    }

    #[tokio::test]
    async fn test_dashboard_includes_comparison() {
        let (dashboard, panel) = service()
            .get_dashboard("Alcores", RangeSelection::All, Granularity::Daily)
            .await
            .unwrap();

        assert_eq!(panel.name, "Alcores");
        assert_eq!(panel.observed_peak_mw, Some(30.0));

        let comparison = dashboard
            .sections
            .iter()
            .find_map(|s| match s {
                DashboardSection::Comparison(farms) => Some(farms),
                _ => None,
            })
            .unwrap();
        let names: Vec<&str> = comparison.iter().map(|f| f.farm.as_str()).collect();
        assert_eq!(names, vec!["Alcores", "Brenes"]);
        assert_eq!(comparison[1].days[0].mwh, 8.0);
    }

    #[tokio::test]
    async fn test_compare_outside_data_is_empty() {
        let range = DateRange::parse("2020-01-01", "2020-12-31").unwrap();
        assert!(service().compare(&range).await.unwrap().is_empty());
    }
}
