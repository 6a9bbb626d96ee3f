use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::db::models::PredictionRow;
use crate::error::Result;
use crate::types::{like_contains, PredictionType, SortOrder};

const PREDICTION_COLUMNS: &str = "id, username, prediction_type, prediction_text, player_id, \
    player_name, stat_type, comparison_operator, target_value, current_value, season, game_id, \
    game_date, is_after_start, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSort {
    CreatedAt,
    TargetValue,
    CurrentValue,
    Username,
    StatType,
}

impl PredictionSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(PredictionSort::CreatedAt),
            "target_value" => Some(PredictionSort::TargetValue),
            "current_value" => Some(PredictionSort::CurrentValue),
            "username" => Some(PredictionSort::Username),
            "stat_type" => Some(PredictionSort::StatType),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            PredictionSort::CreatedAt => "created_at",
            PredictionSort::TargetValue => "target_value",
            PredictionSort::CurrentValue => "current_value",
            PredictionSort::Username => "username",
            PredictionSort::StatType => "stat_type",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionQuery {
    /// Substring of username, player name or prediction text.
    pub search: Option<String>,
    pub prediction_type: Option<PredictionType>,
    pub sort: PredictionSort,
    pub order: SortOrder,
}

pub async fn insert_prediction(pool: &SqlitePool, p: &PredictionRow) -> Result<PredictionRow> {
    let sql = format!(
        "INSERT INTO predictions ({PREDICTION_COLUMNS}) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {PREDICTION_COLUMNS}"
    );
    let row = sqlx::query_as::<_, PredictionRow>(&sql)
        .bind(&p.id)
        .bind(&p.username)
        .bind(&p.prediction_type)
        .bind(&p.prediction_text)
        .bind(&p.player_id)
        .bind(&p.player_name)
        .bind(&p.stat_type)
        .bind(&p.comparison_operator)
        .bind(p.target_value)
        .bind(p.current_value)
        .bind(&p.season)
        .bind(&p.game_id)
        .bind(&p.game_date)
        .bind(p.is_after_start)
        .bind(&p.created_at)
        .bind(&p.updated_at)
        .fetch_one(pool)
        .await?;
    Ok(row)
}

pub async fn list_predictions(pool: &SqlitePool, q: &PredictionQuery) -> Result<Vec<PredictionRow>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {PREDICTION_COLUMNS} FROM predictions WHERE 1 = 1"));

    if let Some(term) = q.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_contains(term);
        qb.push(" AND (username LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR player_name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR prediction_text LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }
    if let Some(kind) = q.prediction_type {
        qb.push(" AND prediction_type = ").push_bind(kind.as_str());
    }
    qb.push(" ORDER BY ")
        .push(q.sort.column())
        .push(" ")
        .push(q.order.as_sql())
        .push(", id ASC");

    let rows = qb.build_query_as::<PredictionRow>().fetch_all(pool).await?;
    Ok(rows)
}
