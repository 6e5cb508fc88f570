//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    domain::SUPPORTED_LANGUAGES,
    infrastructure::dto::http::{
        DetectLanguageRequest, DetectLanguageResponse, ErrorResponse, HealthResponse,
        LanguageInfo, LanguagesResponse, RoomDetailResponse, RoomListResponse, RoomSummary,
        STATUS_SUCCESS, ServiceDescriptor, StatsBody, StatsResponse, TranslateRequest,
        TranslateResponse,
    },
    ui::{error::ApiFailure, state::AppState},
    usecase::TranslateCommand,
};

pub const SERVICE_NAME: &str = "Dashka Translation Relay";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENDPOINTS: &[&str] = &[
    "/health",
    "/stats",
    "/translate",
    "/languages",
    "/detect-language",
    "/api/rooms",
    "/api/rooms/{room_id}",
    "/ws",
];

/// Service descriptor
pub async fn service_descriptor() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        name: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        status: "running".to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        websocket: "/ws".to_string(),
    })
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.get_stats_usecase.execute().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        websocket_clients: stats.websocket_clients,
        cache_size: stats.cache_size,
        rooms: stats.rooms,
        translation_configured: stats.translation_configured,
        uptime_secs: stats.uptime_secs,
        timestamp: state.now_rfc3339(),
    })
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let stats = state.get_stats_usecase.execute().await;
    Json(StatsResponse {
        status: STATUS_SUCCESS.to_string(),
        stats: StatsBody {
            cache_size: stats.cache_size,
            websocket_clients: stats.websocket_clients,
            rooms: stats.rooms,
            uptime_secs: stats.uptime_secs,
            version: SERVICE_VERSION.to_string(),
        },
    })
}

/// Translate text, consulting the result cache first
pub async fn translate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiFailure> {
    let Json(request) = body.map_err(|e| state.reject(e))?;

    let outcome = state
        .translate_text_usecase
        .execute(TranslateCommand {
            source: request.resolved_source(),
            target: request.resolved_target(),
            text: request.text.unwrap_or_default(),
        })
        .await
        .map_err(|e| state.reject(e))?;

    Ok(Json(TranslateResponse::from_result(
        outcome.result,
        outcome.from_cache,
    )))
}

pub async fn languages() -> Json<LanguagesResponse> {
    let languages: Vec<LanguageInfo> = SUPPORTED_LANGUAGES.iter().map(Into::into).collect();
    Json(LanguagesResponse {
        status: STATUS_SUCCESS.to_string(),
        count: languages.len(),
        languages,
    })
}

pub async fn detect_language(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DetectLanguageRequest>, JsonRejection>,
) -> Result<Json<DetectLanguageResponse>, ApiFailure> {
    let Json(request) = body.map_err(|e| state.reject(e))?;
    let text = request.text.unwrap_or_default();

    let detected = state
        .detect_language_usecase
        .execute(&text)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(detected.into()))
}

/// Get list of rooms
pub async fn list_rooms(State(state): State<Arc<AppState>>) -> Json<RoomListResponse> {
    let rooms: Vec<RoomSummary> = state
        .get_rooms_usecase
        .execute()
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Json(RoomListResponse {
        status: STATUS_SUCCESS.to_string(),
        count: rooms.len(),
        rooms,
    })
}

/// Get room detail by ID
pub async fn room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailResponse>, ApiFailure> {
    let room = state
        .get_room_detail_usecase
        .execute(room_id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(room.into()))
}

/// Fallback for unknown routes
pub async fn not_found(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            status: "error".to_string(),
            message: "Endpoint not found".to_string(),
            timestamp: state.now_rfc3339(),
            available_endpoints: Some(ENDPOINTS.iter().map(|e| e.to_string()).collect()),
        }),
    )
}
