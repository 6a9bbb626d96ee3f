use chrono::{Datelike, NaiveDate};

use crate::error::{AppError, Result};

/// Players must have appeared in more than this many games to qualify for an
/// average-based leader board. Applied to season and career boards alike.
pub const MIN_GAMES_PLAYED: i64 = 20;

/// Entries per season / all-time leader board.
pub const LEADERS_LIMIT: i64 = 10;

/// Entries shown on a compact featured leaderboard card.
pub const FEATURED_COMPACT_LIMIT: usize = 5;

/// Entries materialised for the full-list view of any leaderboard.
/// Independent of the `topN` the leaderboard was created with.
pub const FULL_LIST_LIMIT: usize = 50;

/// `topN` assumed when a decoded leaderboard config omits it.
pub const DEFAULT_TOP_N: usize = 5;

/// Player search: shorter queries never reach the database.
pub const SEARCH_MIN_CHARS: usize = 2;
pub const SEARCH_LIMIT: i64 = 6;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Display name used when a ranked player id has no `players` row.
pub const UNKNOWN_PLAYER: &str = "Unknown Player";

/// Month the regular season starts in (October).
pub const SEASON_START_MONTH: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub db_path: String,
    pub api_port: u16,
    /// Season id used by the current-season leader boards (CURRENT_SEASON), e.g. "2024-25".
    pub current_season: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let today = chrono::Utc::now().date_naive();
        let current_season = match std::env::var("CURRENT_SEASON") {
            Ok(s) if !s.trim().is_empty() => {
                let s = s.trim().to_string();
                season_start_year(&s).ok_or_else(|| {
                    AppError::Config(format!("CURRENT_SEASON must look like 2024-25, got {s}"))
                })?;
                s
            }
            _ => season_for_date(today),
        };

        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "hoopstats.db".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            current_season,
        })
    }
}

/// Season id containing `date`. October onwards belongs to the season that
/// starts that year: 2024-11-02 → "2024-25", 2025-03-10 → "2024-25".
pub fn season_for_date(date: NaiveDate) -> String {
    let start = if date.month() >= SEASON_START_MONTH {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

/// Start year of a season id: "2024-25" → 2024.
pub fn season_start_year(season: &str) -> Option<i32> {
    let (start, end) = season.split_once('-')?;
    if start.len() != 4 || end.len() != 2 {
        return None;
    }
    let start: i32 = start.parse().ok()?;
    let end: i32 = end.parse().ok()?;
    if (start + 1).rem_euclid(100) != end {
        return None;
    }
    Some(start)
}

/// First day of the season: October 1st of its start year.
pub fn season_start_date(season: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(season_start_year(season)?, SEASON_START_MONTH, 1)
}
