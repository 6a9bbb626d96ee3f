use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::health::{get_health, HealthState};
use crate::api::latency::{get_stats_latency, LatencyStats};
use crate::config::{FEATURED_COMPACT_LIMIT, FULL_LIST_LIMIT};
use crate::db::players::{self, PlayerDetails, PlayerHit, PlayerListQuery, PlayerSort, PlayersPage};
use crate::db::predictions::{PredictionQuery, PredictionSort};
use crate::error::AppError;
use crate::leaderboard::featured::FeaturedResult;
use crate::leaderboard::leaders::LeadersResponse;
use crate::leaderboard::{share, validate_request, FeaturedBoard, LeaderboardService, FEATURED_LEADERBOARDS};
use crate::predictions;
use crate::types::{
    CreatePredictionInput, LeaderboardEntry, LeaderboardRequestInput, Prediction, PredictionType,
    SortOrder, StatFilter,
};

#[derive(Clone)]
pub struct ApiState {
    pub pool: sqlx::SqlitePool,
    pub leaderboards: LeaderboardService,
    pub health: Arc<HealthState>,
    pub latency: Arc<LatencyStats>,
    pub current_season: Arc<str>,
}

impl ApiState {
    pub fn new(pool: sqlx::SqlitePool, current_season: &str) -> Self {
        let health = Arc::new(HealthState::new());
        let latency = Arc::new(LatencyStats::new());
        Self {
            leaderboards: LeaderboardService::new(pool.clone(), Arc::clone(&health), Arc::clone(&latency)),
            pool,
            health,
            latency,
            current_season: Arc::from(current_season),
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(get_health))
        .route("/api/stats/latency", get(get_stats_latency))
        .route("/api/players", get(get_players))
        .route("/api/players/search", get(search_players))
        .route("/api/players/:id", get(get_player))
        .route("/api/leaderboards", get(get_leaders))
        .route("/api/leaderboards/custom", axum::routing::post(create_custom_leaderboard))
        .route("/api/leaderboards/featured", get(get_featured))
        .route("/api/leaderboards/featured/:id", get(get_featured_board))
        .route("/api/leaderboards/:id", get(get_shared_leaderboard))
        .route("/api/predictions", get(get_predictions).post(create_prediction))
        .with_state(state)
}

fn query_or_400<T>(q: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    q.map(|Query(t)| t)
        .map_err(|e| AppError::validation(format!("Invalid query string: {}", e.body_text())))
}

fn json_or_400<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(t)| t)
        .map_err(|e| AppError::validation(format!("Invalid JSON body: {}", e.body_text())))
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayersQuery {
    /// 0-based, as sent by table pagination controls. Wins over `pageNo`.
    pub page: Option<i64>,
    pub page_no: Option<i64>,
    /// Wins over `rowsPerPage`.
    pub page_size: Option<i64>,
    pub rows_per_page: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionsQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    #[serde(rename = "type")]
    pub prediction_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CustomLeaderboardResponse {
    pub success: bool,
    /// Shareable id for the full-list view.
    pub id: String,
    pub title: String,
    pub results: Vec<LeaderboardEntry>,
    pub filters: Vec<StatFilter>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedConfigResponse {
    pub top_n: usize,
    pub stat_filters: Vec<StatFilter>,
}

#[derive(Serialize)]
pub struct SharedLeaderboardResponse {
    pub title: String,
    pub results: Vec<LeaderboardEntry>,
    pub config: SharedConfigResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_players(
    State(state): State<ApiState>,
    params: Result<Query<PlayersQuery>, QueryRejection>,
) -> Result<Json<PlayersPage>, AppError> {
    let params = query_or_400(params)?;
    let q = PlayerListQuery {
        page: params.page.or(params.page_no).unwrap_or(0).max(0).saturating_add(1),
        page_size: params
            .page_size
            .or(params.rows_per_page)
            .unwrap_or(crate::config::DEFAULT_PAGE_SIZE),
        sort: PlayerSort::parse_or_name(params.sort_by.as_deref()),
        order: SortOrder::parse_or(params.sort_order.as_deref(), SortOrder::Asc),
        search: params.search,
    };
    Ok(Json(players::list_players(&state.pool, &q).await?))
}

async fn search_players(
    State(state): State<ApiState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<PlayerHit>>, AppError> {
    let params = query_or_400(params)?;
    let q = params.q.unwrap_or_default();
    Ok(Json(players::search_players(&state.pool, &q).await?))
}

async fn get_player(
    State(state): State<ApiState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerDetails>, AppError> {
    Ok(Json(players::player_details(&state.pool, &player_id).await?))
}

async fn get_leaders(State(state): State<ApiState>) -> Json<LeadersResponse> {
    Json(state.leaderboards.leaders(&state.current_season).await)
}

async fn create_custom_leaderboard(
    State(state): State<ApiState>,
    body: Result<Json<LeaderboardRequestInput>, JsonRejection>,
) -> Result<Json<CustomLeaderboardResponse>, AppError> {
    let input = json_or_400(body)?;
    let req = validate_request(&input)?;
    let results = state.leaderboards.custom(&req).await?;
    info!(
        title = %req.title,
        filters = req.stat_filters.len(),
        top_n = req.top_n,
        results = results.len(),
        "Custom leaderboard created"
    );

    Ok(Json(CustomLeaderboardResponse {
        success: true,
        id: share::encode_id(&req),
        title: req.title,
        results,
        filters: req.stat_filters,
    }))
}

async fn get_shared_leaderboard(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<SharedLeaderboardResponse>, AppError> {
    let not_found = || AppError::NotFound("Leaderboard not found".to_string());
    let input = share::decode_id(&id).ok_or_else(not_found)?;
    let req = validate_request(&input).map_err(|e| {
        debug!(id = %id, "Shared leaderboard config rejected: {e}");
        not_found()
    })?;
    let results = state.leaderboards.full_list(&req.stat_filters).await?;

    Ok(Json(SharedLeaderboardResponse {
        title: req.title,
        results,
        config: SharedConfigResponse {
            top_n: req.top_n,
            stat_filters: req.stat_filters,
        },
    }))
}

async fn get_featured(
    State(state): State<ApiState>,
    params: Result<Query<FeaturedQuery>, QueryRejection>,
) -> Result<Json<Vec<FeaturedResult>>, AppError> {
    let params = query_or_400(params)?;
    let limit = params
        .limit
        .unwrap_or(FEATURED_COMPACT_LIMIT)
        .clamp(1, FULL_LIST_LIMIT);
    Ok(Json(state.leaderboards.featured(FEATURED_LEADERBOARDS, limit).await))
}

async fn get_featured_board(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<FeaturedResult>, AppError> {
    let board = FeaturedBoard::find(&id)
        .ok_or_else(|| AppError::NotFound(format!("Featured leaderboard {id} not found")))?;
    let filters = board.stat_filters()?;
    let results = state.leaderboards.full_list(&filters).await?;

    Ok(Json(FeaturedResult {
        id: board.id,
        title: board.title,
        description: board.description,
        filters,
        results,
    }))
}

async fn get_predictions(
    State(state): State<ApiState>,
    params: Result<Query<PredictionsQuery>, QueryRejection>,
) -> Result<Json<Vec<Prediction>>, AppError> {
    let params = query_or_400(params)?;
    let q = PredictionQuery {
        search: params.search,
        prediction_type: params.prediction_type.as_deref().and_then(PredictionType::parse),
        sort: params
            .sort_by
            .as_deref()
            .and_then(PredictionSort::parse)
            .unwrap_or(PredictionSort::CreatedAt),
        order: SortOrder::parse_or(params.sort_order.as_deref(), SortOrder::Desc),
    };
    Ok(Json(predictions::list_predictions(&state.pool, &q).await?))
}

async fn create_prediction(
    State(state): State<ApiState>,
    body: Result<Json<CreatePredictionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Prediction>), AppError> {
    let input = json_or_400(body)?;
    let prediction = predictions::create_prediction(
        &state.pool,
        &input,
        chrono::Utc::now(),
        &state.current_season,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(prediction)))
}
