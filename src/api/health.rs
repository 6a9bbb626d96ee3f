//! Shared health state for the /health endpoint.
//! Updated by LeaderboardService when a board degrades to an empty result.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::routes::ApiState;

/// Shared health metrics. Updated by the leaderboard pipeline, read by API.
#[derive(Default)]
pub struct HealthState {
    /// Featured or leader boards that failed and were served empty.
    pub degraded_boards: AtomicU64,
    /// Nanosecond timestamp of the last degraded board (0 = none).
    pub last_degraded_at_ns: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_degraded(&self, at_ns: u64) {
        self.degraded_boards.fetch_add(1, Ordering::Relaxed);
        self.last_degraded_at_ns.store(at_ns, Ordering::Relaxed);
    }

    pub fn degraded_boards(&self) -> u64 {
        self.degraded_boards.load(Ordering::Relaxed)
    }

    pub fn last_degraded_at_ns(&self) -> u64 {
        self.last_degraded_at_ns.load(Ordering::Relaxed)
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub db_reachable: bool,
    pub degraded_boards: u64,
    pub last_degraded_at_ns: Option<u64>,
}

pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let db_reachable = sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();
    let last = state.health.last_degraded_at_ns();

    Json(HealthResponse {
        status: if db_reachable { "ok" } else { "degraded" },
        db_reachable,
        degraded_boards: state.health.degraded_boards(),
        last_degraded_at_ns: (last > 0).then_some(last),
    })
}
