pub mod progress;
pub mod text;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::config::season_start_date;
use crate::db::models::PredictionRow;
use crate::db::predictions::{self, PredictionQuery};
use crate::error::{AppError, Result};
use crate::types::{ComparisonOperator, CreatePredictionInput, Prediction, PredictionType};

use progress::evaluate;
use text::{anonymous_username, prediction_text};

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
fn parse_game_start(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Validate a submission and build the row to insert. `is_after_start` is
/// fixed here, against `now`.
pub fn build_prediction(
    input: &CreatePredictionInput,
    username: String,
    now: DateTime<Utc>,
    current_season: &str,
) -> Result<PredictionRow> {
    let (Some(stat_type), Some(op), Some(target_value)) = (
        non_empty(&input.stat_type),
        non_empty(&input.comparison_operator),
        input.target_value,
    ) else {
        return Err(AppError::validation("Missing required fields"));
    };

    let op = ComparisonOperator::parse(&op)
        .ok_or_else(|| AppError::validation(format!("Unknown comparison_operator '{op}'")))?;
    if !target_value.is_finite() {
        return Err(AppError::validation("target_value must be a finite number"));
    }
    let prediction_type = match non_empty(&input.prediction_type) {
        None => PredictionType::Season,
        Some(t) => PredictionType::parse(&t)
            .ok_or_else(|| AppError::validation(format!("Unknown prediction_type '{t}'")))?,
    };

    let season = non_empty(&input.season);
    let game_date = non_empty(&input.game_date);
    let is_after_start = match prediction_type {
        PredictionType::Season => {
            let season_id = season.as_deref().unwrap_or(current_season);
            let start = season_start_date(season_id).ok_or_else(|| {
                AppError::validation(format!("season must look like 2024-25, got '{season_id}'"))
            })?;
            now.date_naive() >= start
        }
        PredictionType::Game => match game_date.as_deref() {
            Some(d) => {
                let start = parse_game_start(d).ok_or_else(|| {
                    AppError::validation(format!("game_date '{d}' is not a date"))
                })?;
                now > start
            }
            None => false,
        },
    };

    let player_name = non_empty(&input.player_name);
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);

    Ok(PredictionRow {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        prediction_type: prediction_type.as_str().to_string(),
        prediction_text: prediction_text(player_name.as_deref(), &stat_type, op, target_value),
        player_id: non_empty(&input.player_id),
        player_name,
        stat_type,
        comparison_operator: op.as_str().to_string(),
        target_value,
        current_value: 0.0,
        season,
        game_id: non_empty(&input.game_id),
        game_date,
        is_after_start,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    })
}

/// Attach evaluated progress. `None` for rows whose enum columns hold
/// values this service never writes.
pub fn to_prediction(row: PredictionRow) -> Option<Prediction> {
    let prediction_type = PredictionType::parse(&row.prediction_type)?;
    let comparison_operator = ComparisonOperator::parse(&row.comparison_operator)?;
    let progress = evaluate(row.current_value, row.target_value, comparison_operator);

    Some(Prediction {
        id: row.id,
        username: row.username,
        prediction_type,
        prediction_text: row.prediction_text,
        player_id: row.player_id,
        player_name: row.player_name,
        stat_type: row.stat_type,
        comparison_operator,
        target_value: row.target_value,
        current_value: row.current_value,
        season: row.season,
        game_id: row.game_id,
        game_date: row.game_date,
        is_after_start: row.is_after_start,
        created_at: row.created_at,
        updated_at: row.updated_at,
        progress: progress.percent,
        is_met: progress.met,
    })
}

pub async fn create_prediction(
    pool: &SqlitePool,
    input: &CreatePredictionInput,
    now: DateTime<Utc>,
    current_season: &str,
) -> Result<Prediction> {
    let username = anonymous_username(&mut rand::thread_rng());
    let row = build_prediction(input, username, now, current_season)?;
    let stored = predictions::insert_prediction(pool, &row).await?;
    info!(
        id = %stored.id,
        prediction_type = %stored.prediction_type,
        stat = %stored.stat_type,
        "Prediction created"
    );
    to_prediction(stored).ok_or_else(|| {
        AppError::Database(sqlx::Error::Protocol("stored prediction failed to round-trip".into()))
    })
}

pub async fn list_predictions(pool: &SqlitePool, query: &PredictionQuery) -> Result<Vec<Prediction>> {
    let rows = predictions::list_predictions(pool, query).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            let prediction = to_prediction(row);
            if prediction.is_none() {
                warn!(id = %id, "Skipping prediction with unrecognised type or operator");
            }
            prediction
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::predictions::PredictionSort;
    use crate::testing::empty_pool;
    use crate::types::SortOrder;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn input(stat: &str, op: &str, target: f64) -> CreatePredictionInput {
        CreatePredictionInput {
            stat_type: Some(stat.into()),
            comparison_operator: Some(op.into()),
            target_value: Some(target),
            ..Default::default()
        }
    }

    fn query() -> PredictionQuery {
        PredictionQuery {
            search: None,
            prediction_type: None,
            sort: PredictionSort::CreatedAt,
            order: SortOrder::Desc,
        }
    }

    #[test]
    fn missing_required_fields_rejected() {
        let now = at(2024, 11, 1);
        for bad in [
            CreatePredictionInput { stat_type: None, ..input("ppg", "more_than", 1.0) },
            CreatePredictionInput { comparison_operator: None, ..input("ppg", "more_than", 1.0) },
            CreatePredictionInput { target_value: None, ..input("ppg", "more_than", 1.0) },
            input("  ", "more_than", 1.0),
        ] {
            let err = build_prediction(&bad, "u".into(), now, "2024-25").unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[test]
    fn unknown_operator_rejected() {
        let err = build_prediction(&input("ppg", "around", 1.0), "u".into(), at(2024, 11, 1), "2024-25")
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn season_prediction_after_start_depends_on_season() {
        let row = build_prediction(&input("ppg", "more_than", 25.0), "u".into(), at(2024, 9, 15), "2024-25")
            .unwrap();
        assert!(!row.is_after_start);
        assert_eq!(row.prediction_type, "season");

        let row = build_prediction(&input("ppg", "more_than", 25.0), "u".into(), at(2025, 2, 1), "2024-25")
            .unwrap();
        assert!(row.is_after_start);

        let mut next = input("ppg", "more_than", 25.0);
        next.season = Some("2025-26".into());
        let row = build_prediction(&next, "u".into(), at(2025, 2, 1), "2024-25").unwrap();
        assert!(!row.is_after_start);
    }

    #[test]
    fn game_prediction_compares_game_date() {
        let mut game = input("points", "at_least", 40.0);
        game.prediction_type = Some("game".into());
        game.game_date = Some("2025-01-10".into());
        game.player_name = Some("Alpha Able".into());

        let before = build_prediction(&game, "u".into(), at(2025, 1, 9), "2024-25").unwrap();
        assert!(!before.is_after_start);
        let after = build_prediction(&game, "u".into(), at(2025, 1, 10), "2024-25").unwrap();
        assert!(after.is_after_start);
        assert_eq!(after.prediction_text, "Alpha Able will score at least 40 Points");

        game.game_date = Some("next tuesday".into());
        assert!(build_prediction(&game, "u".into(), at(2025, 1, 9), "2024-25").is_err());
    }

    #[tokio::test]
    async fn create_then_list_with_progress() {
        let pool = empty_pool().await;
        let created = create_prediction(&pool, &input("ppg", "more_than", 30.0), at(2024, 11, 1), "2024-25")
            .await
            .unwrap();
        assert!(created.username.ends_with(" [anonymous]"));
        assert_eq!(created.current_value, 0.0);
        assert_eq!(created.progress, 0.0);
        assert!(!created.is_met);

        sqlx::query("UPDATE predictions SET current_value = 15 WHERE id = ?")
            .bind(&created.id)
            .execute(&pool)
            .await
            .unwrap();

        let listed = list_predictions(&pool, &query()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].progress, 50.0);
        assert!(!listed[0].is_met);
    }

    #[tokio::test]
    async fn list_filters_by_type_and_search() {
        let pool = empty_pool().await;
        let mut game = input("points", "exactly", 50.0);
        game.prediction_type = Some("game".into());
        game.player_name = Some("Bravo Baker".into());
        create_prediction(&pool, &game, at(2024, 11, 1), "2024-25").await.unwrap();
        create_prediction(&pool, &input("total_blocks", "at_most", 100.0), at(2024, 11, 2), "2024-25")
            .await
            .unwrap();

        let all = list_predictions(&pool, &query()).await.unwrap();
        assert_eq!(all.len(), 2);
        // Newest first.
        assert_eq!(all[0].stat_type, "total_blocks");

        let games = list_predictions(
            &pool,
            &PredictionQuery { prediction_type: Some(PredictionType::Game), ..query() },
        )
        .await
        .unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].player_name.as_deref(), Some("Bravo Baker"));

        let found = list_predictions(&pool, &PredictionQuery { search: Some("bLoCkS".into()), ..query() })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);

        let none = list_predictions(&pool, &PredictionQuery { search: Some("%".into()), ..query() })
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
