// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::farm_service::FarmService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::aggregation::Granularity;

#[derive(Clone)]
pub struct AppState {
    pub farm_service: FarmService,
    pub dashboard_service: DashboardService,
    pub streaming_service: StreamingDashboardService,
    /// Used when a request names no granularity
    pub default_granularity: Granularity,
}
