/// Database row types matching `migrations/0001_init.sql`.
/// Used by sqlx for typed queries.
use serde::Serialize;

#[derive(Debug, sqlx::FromRow)]
pub struct PlayerRow {
    pub player_id: String,
    pub name: String,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub position: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub birth_date: Option<String>,
    /// JSON array text.
    pub colleges: String,
    pub hall_of_fame: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SeasonTotalsRow {
    pub player_id: String,
    pub season: String,
    pub team_id: String,
    pub age: Option<i64>,
    pub games: i64,
    pub games_started: i64,
    pub minutes_played: i64,
    pub fg: i64,
    pub fga: i64,
    pub fg3: i64,
    pub fg3a: i64,
    pub ft: i64,
    pub fta: i64,
    pub orb: i64,
    pub drb: i64,
    pub trb: i64,
    pub ast: i64,
    pub stl: i64,
    pub blk: i64,
    pub tov: i64,
    pub pf: i64,
    pub pts: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AdvancedStatsRow {
    pub player_id: String,
    pub season: String,
    pub team_id: String,
    pub games: i64,
    pub per: Option<f64>,
    pub ts_pct: Option<f64>,
    pub usg_pct: Option<f64>,
    pub ws: Option<f64>,
    pub ws_per_48: Option<f64>,
    pub bpm: Option<f64>,
    pub vorp: Option<f64>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PerGameRow {
    pub player_id: String,
    pub season: String,
    pub games: i64,
    pub mp_per_g: Option<f64>,
    pub pts_per_g: Option<f64>,
    pub ast_per_g: Option<f64>,
    pub trb_per_g: Option<f64>,
    pub stl_per_g: Option<f64>,
    pub blk_per_g: Option<f64>,
    pub tov_per_g: Option<f64>,
    pub fg_pct: Option<f64>,
    pub fg3_pct: Option<f64>,
    pub ft_pct: Option<f64>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PredictionRow {
    pub id: String,
    pub username: String,
    pub prediction_type: String,
    pub prediction_text: String,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub stat_type: String,
    pub comparison_operator: String,
    pub target_value: f64,
    pub current_value: f64,
    pub season: Option<String>,
    pub game_id: Option<String>,
    pub game_date: Option<String>,
    pub is_after_start: bool,
    pub created_at: String,
    pub updated_at: String,
}
