use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use futures_util::future::join_all;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::config::{DEFAULT_TOP_N, FULL_LIST_LIMIT, LEADERS_LIMIT, MIN_GAMES_PLAYED};
use crate::db::stats;
use crate::error::{AppError, Result};
use crate::leaderboard::enrich::enrich;
use crate::leaderboard::featured::{FeaturedBoard, FeaturedResult};
use crate::leaderboard::leaders::{LeaderStat, LeadersResponse, StatLeaders};
use crate::leaderboard::predicate::{validate_filters, Predicate};
use crate::leaderboard::ranking::rank_by_count;
use crate::types::{LeaderboardEntry, LeaderboardRequest, LeaderboardRequestInput, StatFilter};

/// Validate a submitted custom leaderboard before anything touches the store.
pub fn validate_request(input: &LeaderboardRequestInput) -> Result<LeaderboardRequest> {
    let title = input
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    let filters = input.stat_filters.as_deref().filter(|f| !f.is_empty());
    let (Some(title), Some(filters)) = (title, filters) else {
        return Err(AppError::validation(
            "Invalid request: title and statFilters are required",
        ));
    };

    let top_n = match input.top_n {
        None => DEFAULT_TOP_N,
        Some(n) if n > 0 => (n as usize).min(FULL_LIST_LIMIT),
        Some(n) => {
            return Err(AppError::validation(format!(
                "topN must be a positive integer, got {n}"
            )))
        }
    };

    Ok(LeaderboardRequest {
        title: title.to_string(),
        top_n,
        stat_filters: validate_filters(filters)?,
    })
}

/// Orchestrates predicate → qualifying rows → ranking → name enrichment.
/// Cheap to clone; one per router state.
#[derive(Clone)]
pub struct LeaderboardService {
    pool: SqlitePool,
    health: Arc<HealthState>,
    latency: Arc<LatencyStats>,
}

impl LeaderboardService {
    pub fn new(pool: SqlitePool, health: Arc<HealthState>, latency: Arc<LatencyStats>) -> Self {
        Self {
            pool,
            health,
            latency,
        }
    }

    /// Top `limit` players by number of games matching every filter.
    pub async fn rank(&self, filters: &[StatFilter], limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let predicate = Predicate::new(filters)?;
        let started = Instant::now();

        let player_ids = stats::qualifying_player_ids(&self.pool, &predicate).await?;
        let qualifying = player_ids.len();
        let ranked: Vec<(String, f64)> = rank_by_count(&player_ids, limit)
            .into_iter()
            .map(|r| (r.player_id, r.count as f64))
            .collect();
        let entries = enrich(&self.pool, ranked).await;

        self.latency.record(started.elapsed());
        debug!(
            predicate = %predicate,
            qualifying,
            returned = entries.len(),
            "Leaderboard ranked"
        );
        Ok(entries)
    }

    /// Compact view: the request's own `topN`.
    pub async fn custom(&self, req: &LeaderboardRequest) -> Result<Vec<LeaderboardEntry>> {
        self.rank(&req.stat_filters, req.top_n).await
    }

    /// Full-list view of the same filters, always [`FULL_LIST_LIMIT`] deep.
    pub async fn full_list(&self, filters: &[StatFilter]) -> Result<Vec<LeaderboardEntry>> {
        self.rank(filters, FULL_LIST_LIMIT).await
    }

    /// Resolve every board concurrently. A board that fails yields an empty
    /// result and a warning; the others are unaffected.
    pub async fn featured(&self, boards: &[FeaturedBoard], limit: usize) -> Vec<FeaturedResult> {
        let futures = boards.iter().map(|board| async move {
            let resolved = async {
                let filters = board.stat_filters()?;
                let results = self.rank(&filters, limit).await?;
                Ok::<_, AppError>((filters, results))
            }
            .await;
            let (filters, results) = match resolved {
                Ok(ok) => ok,
                Err(e) => {
                    warn!(board = board.id, "Featured leaderboard failed: {e}");
                    self.health.record_degraded(now_ns());
                    (Vec::new(), Vec::new())
                }
            };
            FeaturedResult {
                id: board.id,
                title: board.title,
                description: board.description,
                filters,
                results,
            }
        });
        join_all(futures).await
    }

    /// Current-season and career per-game leaders for every [`LeaderStat`],
    /// ten independent queries run concurrently.
    pub async fn leaders(&self, season: &str) -> LeadersResponse {
        let season_boards = join_all(LeaderStat::ALL.map(|stat| async move {
            let rows = stats::season_leaders(
                &self.pool,
                stat.season_column(),
                season,
                MIN_GAMES_PLAYED,
                LEADERS_LIMIT,
            )
            .await;
            (stat, self.finish_leader_board(stat, "season", rows).await)
        }));
        let career_boards = join_all(LeaderStat::ALL.map(|stat| async move {
            let rows = stats::career_leaders(
                &self.pool,
                stat.career_column(),
                MIN_GAMES_PLAYED,
                LEADERS_LIMIT,
            )
            .await;
            (stat, self.finish_leader_board(stat, "career", rows).await)
        }));

        let started = Instant::now();
        let (season_boards, career_boards) = tokio::join!(season_boards, career_boards);
        self.latency.record(started.elapsed());

        let mut current_season = StatLeaders::default();
        for (stat, entries) in season_boards {
            current_season.set(stat, entries);
        }
        let mut all_time = StatLeaders::default();
        for (stat, entries) in career_boards {
            all_time.set(stat, entries);
        }
        info!(season, "Leader boards assembled");

        LeadersResponse {
            season: season.to_string(),
            current_season,
            all_time,
        }
    }

    async fn finish_leader_board(
        &self,
        stat: LeaderStat,
        scope: &'static str,
        rows: Result<Vec<(String, f64)>>,
    ) -> Vec<LeaderboardEntry> {
        match rows {
            Ok(rows) => enrich(&self.pool, rows).await,
            Err(e) => {
                warn!(stat = stat.key(), scope, "Leader board query failed: {e}");
                self.health.record_degraded(now_ns());
                Vec::new()
            }
        }
    }
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
