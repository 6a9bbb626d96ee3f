use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SEARCH_LIMIT, SEARCH_MIN_CHARS};
use crate::db::models::{AdvancedStatsRow, PerGameRow, PlayerRow, SeasonTotalsRow};
use crate::error::{AppError, Result};
use crate::types::{like_contains, SortOrder};

const PLAYER_COLUMNS: &str = "player_id, name, year_min, year_max, position, height_cm, \
    weight_kg, birth_date, colleges, hall_of_fame";

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub player_id: String,
    pub name: String,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub position: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub birth_date: Option<String>,
    pub colleges: Vec<String>,
    pub hall_of_fame: bool,
}

impl From<PlayerRow> for Player {
    fn from(r: PlayerRow) -> Self {
        Self {
            colleges: serde_json::from_str(&r.colleges).unwrap_or_default(),
            player_id: r.player_id,
            name: r.name,
            year_min: r.year_min,
            year_max: r.year_max,
            position: r.position,
            height_cm: r.height_cm,
            weight_kg: r.weight_kg,
            birth_date: r.birth_date,
            hall_of_fame: r.hall_of_fame,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSort {
    Name,
    PlayerId,
    YearMin,
    YearMax,
    Position,
    HeightCm,
    WeightKg,
}

impl PlayerSort {
    /// Unknown keys sort by name.
    pub fn parse_or_name(s: Option<&str>) -> Self {
        match s.unwrap_or("name") {
            "player_id" => PlayerSort::PlayerId,
            "year_min" => PlayerSort::YearMin,
            "year_max" => PlayerSort::YearMax,
            "position" => PlayerSort::Position,
            "height_cm" => PlayerSort::HeightCm,
            "weight_kg" => PlayerSort::WeightKg,
            _ => PlayerSort::Name,
        }
    }

    fn column(self) -> &'static str {
        match self {
            PlayerSort::Name => "name",
            PlayerSort::PlayerId => "player_id",
            PlayerSort::YearMin => "year_min",
            PlayerSort::YearMax => "year_max",
            PlayerSort::Position => "position",
            PlayerSort::HeightCm => "height_cm",
            PlayerSort::WeightKg => "weight_kg",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerListQuery {
    /// 1-based.
    pub page: i64,
    pub page_size: i64,
    pub sort: PlayerSort,
    pub order: SortOrder,
    pub search: Option<String>,
}

impl Default for PlayerListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: PlayerSort::Name,
            order: SortOrder::Asc,
            search: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayersPage {
    pub players: Vec<Player>,
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetails {
    pub player_details: Player,
    pub season_totals: Vec<SeasonTotalsRow>,
    pub advanced_stats: Vec<AdvancedStatsRow>,
    pub per_game_stats: Vec<PerGameRow>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlayerHit {
    pub player_id: String,
    pub name: String,
}

fn push_search(qb: &mut QueryBuilder<'_, Sqlite>, search: Option<&str>) {
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_contains(term);
        qb.push(" WHERE name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR player_id LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\'");
    }
}

pub async fn list_players(pool: &SqlitePool, q: &PlayerListQuery) -> Result<PlayersPage> {
    let page = q.page.max(1);
    let page_size = q.page_size.clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1)
        .checked_mul(page_size)
        .ok_or_else(|| AppError::validation(format!("page {page} is out of range")))?;

    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM players");
    push_search(&mut count_qb, q.search.as_deref());
    let total_count: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {PLAYER_COLUMNS} FROM players"));
    push_search(&mut qb, q.search.as_deref());
    qb.push(" ORDER BY ")
        .push(q.sort.column())
        .push(" ")
        .push(q.order.as_sql())
        .push(", player_id ASC LIMIT ")
        .push_bind(page_size)
        .push(" OFFSET ")
        .push_bind(offset);
    let rows = qb.build_query_as::<PlayerRow>().fetch_all(pool).await?;

    Ok(PlayersPage {
        players: rows.into_iter().map(Player::from).collect(),
        total_count,
        page,
        page_size,
        total_pages: (total_count + page_size - 1) / page_size,
    })
}

pub async fn player_details(pool: &SqlitePool, player_id: &str) -> Result<PlayerDetails> {
    let player = sqlx::query_as::<_, PlayerRow>(&format!(
        "SELECT {PLAYER_COLUMNS} FROM players WHERE player_id = ?"
    ))
    .bind(player_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Player {player_id} not found")))?;

    let season_totals = sqlx::query_as::<_, SeasonTotalsRow>(
        "SELECT player_id, season, team_id, age, games, games_started, minutes_played, \
         fg, fga, fg3, fg3a, ft, fta, orb, drb, trb, ast, stl, blk, tov, pf, pts \
         FROM player_season_totals WHERE player_id = ? ORDER BY season ASC, team_id ASC",
    )
    .bind(player_id)
    .fetch_all(pool)
    .await?;

    let advanced_stats = sqlx::query_as::<_, AdvancedStatsRow>(
        "SELECT player_id, season, team_id, games, per, ts_pct, usg_pct, ws, ws_per_48, bpm, vorp \
         FROM player_advanced_stats WHERE player_id = ? ORDER BY season ASC, team_id ASC",
    )
    .bind(player_id)
    .fetch_all(pool)
    .await?;

    let per_game_stats = sqlx::query_as::<_, PerGameRow>(
        "SELECT player_id, season, games, mp_per_g, pts_per_g, ast_per_g, trb_per_g, stl_per_g, \
         blk_per_g, tov_per_g, fg_pct, fg3_pct, ft_pct \
         FROM player_season_per_game WHERE player_id = ? ORDER BY season ASC",
    )
    .bind(player_id)
    .fetch_all(pool)
    .await?;

    Ok(PlayerDetails {
        player_details: player.into(),
        season_totals,
        advanced_stats,
        per_game_stats,
    })
}

/// Name search for the typeahead. Queries shorter than [`SEARCH_MIN_CHARS`]
/// return nothing without touching the database.
pub async fn search_players(pool: &SqlitePool, query: &str) -> Result<Vec<PlayerHit>> {
    let query = query.trim();
    if query.chars().count() < SEARCH_MIN_CHARS {
        return Ok(Vec::new());
    }
    let hits = sqlx::query_as::<_, PlayerHit>(
        "SELECT player_id, name FROM players WHERE name LIKE ? ESCAPE '\\' ORDER BY name ASC LIMIT ?",
    )
    .bind(like_contains(query))
    .bind(SEARCH_LIMIT)
    .fetch_all(pool)
    .await?;
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_pool;

    #[tokio::test]
    async fn pages_and_counts() {
        let pool = seeded_pool().await;
        let q = PlayerListQuery {
            page_size: 3,
            ..Default::default()
        };
        let first = list_players(&pool, &q).await.unwrap();
        assert_eq!(first.total_count, 4);
        assert_eq!(first.total_pages, 2);
        let names: Vec<&str> = first.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Able", "Bravo Baker", "Charlie Cole"]);
        assert_eq!(first.players[2].colleges, vec!["UCLA", "USC"]);

        let second = list_players(&pool, &PlayerListQuery { page: 2, ..q }).await.unwrap();
        assert_eq!(second.players.len(), 1);
        assert_eq!(second.players[0].name, "Delta Dunn");
    }

    #[tokio::test]
    async fn sorts_descending_and_searches() {
        let pool = seeded_pool().await;
        let q = PlayerListQuery {
            order: SortOrder::Desc,
            ..Default::default()
        };
        let page = list_players(&pool, &q).await.unwrap();
        assert_eq!(page.players[0].name, "Delta Dunn");

        let q = PlayerListQuery {
            search: Some("bak".into()),
            ..Default::default()
        };
        let page = list_players(&pool, &q).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.players[0].player_id, "bakerb01");
    }

    #[tokio::test]
    async fn details_include_all_stat_tables() {
        let pool = seeded_pool().await;
        let details = player_details(&pool, "bakerb01").await.unwrap();
        assert_eq!(details.player_details.name, "Bravo Baker");
        let seasons: Vec<&str> = details.season_totals.iter().map(|s| s.season.as_str()).collect();
        assert_eq!(seasons, vec!["2023-24", "2024-25"]);
        assert_eq!(details.per_game_stats.len(), 2);
        assert!((details.per_game_stats[1].pts_per_g.unwrap() - 25.0).abs() < 1e-9);

        let able = player_details(&pool, "ablea01").await.unwrap();
        assert_eq!(able.advanced_stats.len(), 1);
        assert!(able.player_details.hall_of_fame);
    }

    #[tokio::test]
    async fn unknown_player_is_not_found() {
        let pool = seeded_pool().await;
        let err = player_details(&pool, "nobody01").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn short_search_never_queries() {
        let pool = seeded_pool().await;
        pool.close().await;
        assert!(search_players(&pool, "a").await.unwrap().is_empty());
        assert!(search_players(&pool, " ").await.unwrap().is_empty());
        assert!(search_players(&pool, "al").await.is_err());
    }

    #[tokio::test]
    async fn search_matches_substrings_case_insensitively() {
        let pool = seeded_pool().await;
        let hits = search_players(&pool, "COLE").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].player_id, "colec01");
    }
}
