//! Leaderboard reads against the game-log, per-game and career tables.

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::Result;
use crate::leaderboard::predicate::Predicate;

/// Player id of every game log row matching `predicate`, earliest game first.
///
/// No LIMIT: ranking needs every qualifying row.
pub async fn qualifying_player_ids(
    pool: &SqlitePool,
    predicate: &Predicate<'_>,
) -> Result<Vec<String>> {
    let mut qb = QueryBuilder::<Sqlite>::new("SELECT player_id FROM player_game_logs");
    predicate.push_where(&mut qb);
    qb.push(" ORDER BY game_date ASC, id ASC");

    let ids = qb.build_query_scalar::<String>().fetch_all(pool).await?;
    Ok(ids)
}

/// Single batched name lookup for `player_ids`. Ids without a `players` row
/// are absent from the map.
pub async fn player_names(
    pool: &SqlitePool,
    player_ids: &[String],
) -> Result<HashMap<String, String>> {
    if player_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut qb = QueryBuilder::<Sqlite>::new("SELECT player_id, name FROM players WHERE player_id IN (");
    let mut ids = qb.separated(", ");
    for id in player_ids {
        ids.push_bind(id.clone());
    }
    ids.push_unseparated(")");

    let rows: Vec<(String, String)> = qb.build_query_as().fetch_all(pool).await?;
    Ok(rows.into_iter().collect())
}

/// Top `limit` players for one per-game column in `season`, among players
/// with more than `min_games` games.
///
/// `column` must come from [`crate::leaderboard::leaders::LeaderStat`].
pub async fn season_leaders(
    pool: &SqlitePool,
    column: &'static str,
    season: &str,
    min_games: i64,
    limit: i64,
) -> Result<Vec<(String, f64)>> {
    let sql = format!(
        "SELECT player_id, {column} AS value FROM player_season_per_game \
         WHERE season = ? AND games > ? AND {column} IS NOT NULL \
         ORDER BY value DESC, player_id ASC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, (String, f64)>(&sql)
        .bind(season)
        .bind(min_games)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Career counterpart of [`season_leaders`].
pub async fn career_leaders(
    pool: &SqlitePool,
    column: &'static str,
    min_games: i64,
    limit: i64,
) -> Result<Vec<(String, f64)>> {
    let sql = format!(
        "SELECT player_id, {column} AS value FROM player_career_averages \
         WHERE total_career_games > ? AND {column} IS NOT NULL \
         ORDER BY value DESC, player_id ASC LIMIT ?"
    );
    let rows = sqlx::query_as::<_, (String, f64)>(&sql)
        .bind(min_games)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
