use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::warn;

use crate::config::UNKNOWN_PLAYER;
use crate::db::stats::player_names;
use crate::types::LeaderboardEntry;

/// Attach display names and 1-based ranks to `(player_id, value)` pairs
/// already in rank order. Never drops an entry.
pub fn attach_names(
    ranked: Vec<(String, f64)>,
    names: &HashMap<String, String>,
) -> Vec<LeaderboardEntry> {
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, (player_id, value))| LeaderboardEntry {
            player_name: names
                .get(&player_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_PLAYER.to_string()),
            player_id,
            value,
            rank: i + 1,
        })
        .collect()
}

/// Resolve names for `ranked` with one batched lookup.
///
/// A failed lookup degrades every name to the placeholder; the ranking itself
/// is still returned.
pub async fn enrich(pool: &SqlitePool, ranked: Vec<(String, f64)>) -> Vec<LeaderboardEntry> {
    let ids: Vec<String> = ranked.iter().map(|(id, _)| id.clone()).collect();
    let names = match player_names(pool, &ids).await {
        Ok(n) => n,
        Err(e) => {
            warn!(players = ids.len(), "Player name lookup failed: {e}");
            HashMap::new()
        }
    };
    attach_names(ranked, &names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_pool;

    #[test]
    fn missing_names_become_placeholder() {
        let names = HashMap::from([("a".to_string(), "Ann".to_string())]);
        let entries = attach_names(vec![("a".into(), 3.0), ("b".into(), 2.0)], &names);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].player_name, "Ann");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].player_name, UNKNOWN_PLAYER);
        assert_eq!(entries[1].rank, 2);
    }

    #[tokio::test]
    async fn enrich_preserves_length_and_order() {
        let pool = seeded_pool().await;
        let ranked = vec![
            ("ghost01".to_string(), 4.0),
            ("bakerb01".to_string(), 3.0),
            ("ablea01".to_string(), 3.0),
        ];
        let entries = enrich(&pool, ranked).await;
        let names: Vec<&str> = entries.iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec![UNKNOWN_PLAYER, "Bravo Baker", "Alpha Able"]);
    }

    #[tokio::test]
    async fn lookup_failure_keeps_every_entry() {
        let pool = seeded_pool().await;
        pool.close().await;
        let entries = enrich(&pool, vec![("ablea01".to_string(), 1.0)]).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].player_name, UNKNOWN_PLAYER);
    }
}
