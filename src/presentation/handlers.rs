// HTTP request handlers
use crate::domain::aggregation::Granularity;
use crate::domain::series::DateRange;
use crate::domain::view_state::RangeSelection;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::dto::{comparison_to_dto, dashboard_to_dto, farm_summary_to_dto, FarmSummaryDto};
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::errors::ApiError;
use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Last N days of the farm's data; ignored when from/to are given
    pub days: Option<String>,
    pub granularity: Option<String>,
}

impl DashboardQuery {
    fn selection(&self) -> Result<RangeSelection, ApiError> {
        match explicit_range(self.from.as_deref(), self.to.as_deref())? {
            Some(range) => Ok(RangeSelection::Explicit(range)),
            None => match self.days.as_deref() {
                Some(raw) => raw
                    .parse()
                    .map(RangeSelection::LastDays)
                    .map_err(|_| ApiError::BadRequest(format!("invalid day count '{}'", raw))),
                None => Ok(RangeSelection::All),
            },
        }
    }

    fn granularity(&self, default: Granularity) -> Result<Granularity, ApiError> {
        match &self.granularity {
            Some(raw) => raw.parse().map_err(ApiError::BadRequest),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

fn explicit_range(from: Option<&str>, to: Option<&str>) -> Result<Option<DateRange>, ApiError> {
    match (from, to) {
        (Some(from), Some(to)) => Ok(Some(DateRange::parse(from, to)?)),
        (None, None) => Ok(None),
        _ => Err(ApiError::BadRequest(
            "'from' and 'to' must be given together".to_string(),
        )),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all farms with their date bounds
pub async fn list_farms(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let farms = state.farm_service.list_farms().await.map_err(|e| {
        tracing::error!("Error listing farms: {:#}", e);
        ApiError::Internal
    })?;

    let dtos: Vec<FarmSummaryDto> = farms.into_iter().map(farm_summary_to_dto).collect();
    Ok(json_response(&dtos, accepts_brotli(&headers)).await?)
}

/// Full dashboard for one farm in a single response
pub async fn get_dashboard(
    Path(name): Path<String>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let selection = query.selection()?;
    let granularity = query.granularity(state.default_granularity)?;

    let (dashboard, panel) = state
        .dashboard_service
        .get_dashboard(&name, selection, granularity)
        .await?;

    let dto = dashboard_to_dto(dashboard, panel);
    Ok(json_response(&dto, accepts_brotli(&headers)).await?)
}

/// Stream dashboard for a specific farm (progressive loading)
pub async fn stream_dashboard(
    Path(name): Path<String>,
    Query(query): Query<DashboardQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let selection = query.selection()?;
    let granularity = query.granularity(state.default_granularity)?;

    let rx = state
        .streaming_service
        .stream_dashboard(&name, selection, granularity)
        .await?;

    Ok(stream_from_receiver(rx, accepts_brotli(&headers))
        .await
        .into_response())
}

/// Daily totals of every farm, side by side
pub async fn compare_farms(
    Query(query): Query<CompareQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let range = explicit_range(query.from.as_deref(), query.to.as_deref())?
        .unwrap_or(DateRange::new(NaiveDate::MIN, NaiveDate::MAX));

    let farms = state.dashboard_service.compare(&range).await?;
    Ok(json_response(&comparison_to_dto(farms), accepts_brotli(&headers)).await?)
}

#[cfg(test)]
mod tests {
    use crate::application::dashboard_service::DashboardService;
    use crate::application::farm_service::FarmService;
    use crate::application::streaming_service::StreamingDashboardService;
    use crate::domain::aggregation::Granularity;
    use crate::domain::dashboard::DashboardSettings;
    use crate::infrastructure::dataset_repository::tests::DATASET;
    use crate::infrastructure::dataset_repository::JsonDatasetRepository;
    use crate::presentation::app_state::AppState;
    use crate::presentation::router;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let repository = Arc::new(JsonDatasetRepository::from_json(DATASET).unwrap());
        let dashboard_service = DashboardService::new(repository.clone(), DashboardSettings::default());
        let state = Arc::new(AppState {
            farm_service: FarmService::new(repository),
            streaming_service: StreamingDashboardService::new(dashboard_service.clone(), 16),
            dashboard_service,
            default_granularity: Granularity::Native,
        });
        router(state)
    }

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = get("/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_list_farms() {
        let response = get("/farms").await;
        assert_eq!(response.status(), StatusCode::OK);

        let farms = json_body(response).await;
        assert_eq!(farms.as_array().map(Vec::len), Some(2));
        assert_eq!(farms[0]["name"], "Alcores");
        assert_eq!(farms[0]["first_date"], "2024-06-01");
        assert_eq!(farms[1]["last_date"], "2024-06-02");
    }

    #[tokio::test]
    async fn test_dashboard_explicit_range() {
        let response = get("/farms/Alcores/dashboard?from=2024-06-02&to=2024-06-02&granularity=1h").await;
        assert_eq!(response.status(), StatusCode::OK);

        let dashboard = json_body(response).await;
        assert_eq!(dashboard["range"]["from"], "2024-06-02");
        assert_eq!(dashboard["granularity"], "hourly");
        assert_eq!(dashboard["sections"].as_array().map(Vec::len), Some(6));
        assert_eq!(dashboard["sections"][0]["section"], "kpis");
        assert_eq!(dashboard["sections"][0]["peak_power_mw"], 30.0);
        assert_eq!(dashboard["metadata"]["province"], "Sevilla");
    }

    #[tokio::test]
    async fn test_dashboard_days_preset() {
        let dashboard = json_body(get("/farms/Alcores/dashboard?days=1").await).await;
        assert_eq!(dashboard["range"]["from"], "2024-06-02");
        assert_eq!(dashboard["range"]["to"], "2024-06-02");
    }

    #[tokio::test]
    async fn test_dashboard_huge_days_reaches_back_to_first_sample() {
        let response = get("/farms/Alcores/dashboard?days=4294967295").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["sections"][0]["peak_power_mw"], 30.0);

        let response = get("/farms/Alcores/stream?days=4294967295").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bad_days_is_json_error() {
        for uri in ["/farms/Alcores/dashboard?days=abc", "/farms/Alcores/stream?days=-1"] {
            let response = get(uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(json_body(response).await["error"].as_str().unwrap().contains("day count"));
        }
    }

    #[tokio::test]
    async fn test_dashboard_errors() {
        let response = get("/farms/Nowhere/dashboard").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "unknown farm 'Nowhere'");

        let response = get("/farms/Alcores/dashboard?granularity=weekly").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get("/farms/Alcores/dashboard?from=2024-06-01").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get("/farms/Alcores/dashboard?from=June&to=July").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_brotli_when_accepted() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/farms")
                    .header(header::ACCEPT_ENCODING, "br")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[header::CONTENT_ENCODING], "br");
    }

    #[tokio::test]
    async fn test_stream_starts_with_skeleton() {
        let response = get("/farms/Alcores/stream?granularity=daily").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let length = u32::from_be_bytes([body[0], body[1], body[2], body[3]]) as usize;
        let first: Value = serde_json::from_slice(&body[4..4 + length]).unwrap();
        assert_eq!(first["type"], "skeleton");
        assert_eq!(first["data"]["title"], "Alcores — Generation Profile");
    }

    #[tokio::test]
    async fn test_stream_unknown_farm() {
        let response = get("/farms/Nowhere/stream").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_compare() {
        let comparison = json_body(get("/compare?from=2024-06-02&to=2024-06-02").await).await;
        let farms = comparison["farms"].as_array().unwrap();
        assert_eq!(farms.len(), 2);
        assert_eq!(farms[1]["farm"], "Brenes");
        assert_eq!(farms[1]["mwh"][0], 8.0);

        let everything = json_body(get("/compare").await).await;
        assert_eq!(everything["farms"][0]["dates"].as_array().map(Vec::len), Some(2));
    }
}
