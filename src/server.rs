use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::api::{
    AdsQuery, ApiAdsResponse, ApiComparisonResponse, ApiError, ApiIceRequest, ApiIceResponse,
    ApiRealtimeResponse, ApiSimulationRequest, DEFAULT_ADS_DAYS,
};
use brand_diagnostics::config::DiagnosticsConfig;
use brand_diagnostics::datasource::{build_data_source, AdsPerformanceSummary, DataSource};
use brand_diagnostics::strategy::rank_by_ice;
use brand_diagnostics::{
    compare_channels, diagnose, simulate_performance, BrandDiagnosticInput, DiagnosticReport,
    DiagnosticsError, SimulationResult,
};

#[derive(Clone)]
pub struct AppState {
    config: Arc<DiagnosticsConfig>,
    data_source: Arc<dyn DataSource>,
}

impl AppState {
    pub fn new(config: DiagnosticsConfig, data_source: Arc<dyn DataSource>) -> Self {
        Self {
            config: Arc::new(config),
            data_source,
        }
    }
}

/// Error wrapper mapping library errors onto HTTP statuses.
pub struct ApiFailure(DiagnosticsError);

impl From<DiagnosticsError> for ApiFailure {
    fn from(err: DiagnosticsError) -> Self {
        ApiFailure(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            err if err.is_client_error() => StatusCode::BAD_REQUEST,
            DiagnosticsError::DataSource(_) | DiagnosticsError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            warn!(error = %self.0, %status, "request failed");
        }
        let body = ApiError {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiFailure>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/simulate", post(simulate_handler))
        .route("/api/simulate/compare", post(compare_handler))
        .route("/api/diagnose", post(diagnose_handler))
        .route("/api/strategies/ice", post(ice_handler))
        .route("/api/realtime/:property_id", get(realtime_handler))
        .route("/api/ads/:account_id", get(ads_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(args: crate::ServeArgs, config: DiagnosticsConfig) -> anyhow::Result<()> {
    let data_source = build_data_source(&config.data_source)?;
    let app = build_router(AppState::new(config, data_source));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "diagnostics API listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "data_source": state.data_source.name(),
        "is_mock": state.data_source.is_mock(),
    }))
}

async fn simulate_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiSimulationRequest>,
) -> ApiResult<SimulationResult> {
    let input = request.into_input()?;
    let result = simulate_performance(&input, &state.config.simulation)?;
    Ok(Json(result))
}

async fn compare_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiSimulationRequest>,
) -> ApiResult<ApiComparisonResponse> {
    let input = request.into_input()?;
    let results = compare_channels(&input, &state.config.simulation)?;
    Ok(Json(ApiComparisonResponse::from_results(results)))
}

async fn diagnose_handler(
    State(state): State<AppState>,
    Json(input): Json<BrandDiagnosticInput>,
) -> ApiResult<DiagnosticReport> {
    let report = diagnose(&input, &state.config)?;
    Ok(Json(report))
}

async fn ice_handler(Json(request): Json<ApiIceRequest>) -> ApiResult<ApiIceResponse> {
    let ranked = rank_by_ice(&request.candidates)?;
    Ok(Json(ApiIceResponse { ranked }))
}

async fn realtime_handler(
    State(state): State<AppState>,
    Path(property_id): Path<String>,
) -> ApiResult<ApiRealtimeResponse> {
    let snapshot = state.data_source.fetch_realtime(&property_id).await?;
    Ok(Json(ApiRealtimeResponse {
        source: state.data_source.name(),
        is_mock: state.data_source.is_mock(),
        snapshot,
    }))
}

async fn ads_handler(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    Query(query): Query<AdsQuery>,
) -> ApiResult<ApiAdsResponse> {
    let days = query.days.unwrap_or(DEFAULT_ADS_DAYS);
    let rows = state
        .data_source
        .fetch_ads_performance(&account_id, days)
        .await?;
    Ok(Json(ApiAdsResponse {
        source: state.data_source.name(),
        is_mock: state.data_source.is_mock(),
        summary: AdsPerformanceSummary::from_days(&rows),
        days: rows,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use brand_diagnostics::datasource::MockDataSource;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState::new(DiagnosticsConfig::default(), Arc::new(MockDataSource::new(7)));
        build_router(state)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_mock_source() {
        let response = test_app()
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["is_mock"], true);
        assert_eq!(body["data_source"], "mock");
    }

    #[tokio::test]
    async fn simulate_returns_expected_roas() {
        let request = post_json(
            "/api/simulate",
            json!({ "budget": 1000000, "channel": "meta", "strategy": "conversion" }),
        );
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["expected_clicks"], 17);
        assert_eq!(body["expected_conversions"], 1);
        assert_eq!(body["confidence"], 75);
    }

    #[tokio::test]
    async fn invalid_slider_is_a_bad_request() {
        let request = post_json("/api/simulate", json!({ "creative_quality": 14 }));
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("creative_quality"));
    }

    #[tokio::test]
    async fn compare_lists_every_channel() {
        let request = post_json("/api/simulate/compare", json!({}));
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["results"].as_array().unwrap().len(), 5);
        assert_eq!(body["best_channel"], body["results"][0]["channel"]);
    }

    #[tokio::test]
    async fn diagnose_without_sections_is_rejected() {
        let request = post_json("/api/diagnose", json!({ "brand": "Acme" }));
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ice_ranks_highest_first() {
        let request = post_json(
            "/api/strategies/ice",
            json!({ "candidates": [
                { "name": "faq schema", "impact": 3, "confidence": 4, "ease": 5 },
                { "name": "cart recovery", "impact": 9, "confidence": 8, "ease": 7 }
            ]}),
        );
        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ranked"][0]["name"], "cart recovery");
        assert_eq!(body["ranked"][0]["priority"], "CRITICAL");
    }

    #[tokio::test]
    async fn ads_rejects_out_of_range_days() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/ads/act-1?days=400")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ads_returns_requested_days() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/ads/act-1?days=14")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["days"].as_array().unwrap().len(), 14);
        assert_eq!(body["summary"]["days"], 14);
        assert_eq!(body["is_mock"], true);
    }
}
