//! In-memory database fixture shared by unit tests.
//!
//! Game logs, 30-point triple-doubles (pts >= 30, trb >= 10, ast >= 10):
//!   ablea01  (Alpha Able)    12 games, stl 2, ft 9, fg_pct 0.50
//!   bakerb01 (Bravo Baker)    9 games, stl 1, ft 5, fg_pct 0.60
//!   colec01  (Charlie Cole)   9 games, stl 3, ft 7, fg_pct 0.56
//!   ghost01  (no players row) 1 game, logged last
//! Baker's first qualifying game precedes Cole's.
//!
//! Season totals: see `seed_season_totals`.

use chrono::{Duration, NaiveDate};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Fresh migrated in-memory database. One connection: every connection to
/// `sqlite::memory:` is a separate database.
pub async fn empty_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

pub async fn seeded_pool() -> SqlitePool {
    let pool = empty_pool().await;
    seed_players(&pool).await;
    seed_game_logs(&pool).await;
    seed_season_totals(&pool).await;
    pool
}

async fn seed_players(pool: &SqlitePool) {
    let players = [
        ("ablea01", "Alpha Able", "G", r#"["Duke"]"#, true),
        ("bakerb01", "Bravo Baker", "F", "[]", false),
        ("colec01", "Charlie Cole", "C", r#"["UCLA","USC"]"#, false),
        ("dunnd01", "Delta Dunn", "G-F", "[]", false),
    ];
    for (id, name, position, colleges, hof) in players {
        sqlx::query(
            "INSERT INTO players (player_id, name, year_min, year_max, position, colleges, hall_of_fame) \
             VALUES (?, ?, 2020, 2025, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(position)
        .bind(colleges)
        .bind(hof)
        .execute(pool)
        .await
        .expect("seed player");
    }
}

struct Line {
    pts: i64,
    trb: i64,
    ast: i64,
    stl: i64,
    ft: i64,
    fg_pct: f64,
}

async fn insert_game(pool: &SqlitePool, player_id: &str, day: i64, line: &Line) {
    let date = NaiveDate::from_ymd_opt(2024, 10, 22).expect("date") + Duration::days(day);
    sqlx::query(
        "INSERT INTO player_game_logs (player_id, season, game_date, pts, trb, ast, stl, ft, fta, fg_pct) \
         VALUES (?, '2024-25', ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(player_id)
    .bind(date.format("%Y-%m-%d").to_string())
    .bind(line.pts)
    .bind(line.trb)
    .bind(line.ast)
    .bind(line.stl)
    .bind(line.ft)
    .bind(line.ft + 1)
    .bind(line.fg_pct)
    .execute(pool)
    .await
    .expect("seed game");
}

async fn seed_game_logs(pool: &SqlitePool) {
    let triple = |stl, ft, fg_pct| Line {
        pts: 31,
        trb: 11,
        ast: 10,
        stl,
        ft,
        fg_pct,
    };
    let mut day = 0;
    for round in 0..12 {
        insert_game(pool, "ablea01", day, &triple(2, 9, 0.50)).await;
        if round < 9 {
            insert_game(pool, "bakerb01", day, &triple(1, 5, 0.60)).await;
            insert_game(pool, "colec01", day, &triple(3, 7, 0.56)).await;
        }
        day += 2;
    }

    // Near misses: one clause short each.
    let near_misses = [
        Line { pts: 30, trb: 9, ast: 12, stl: 2, ft: 4, fg_pct: 0.7 },
        Line { pts: 29, trb: 15, ast: 15, stl: 2, ft: 4, fg_pct: 0.7 },
        Line { pts: 40, trb: 10, ast: 9, stl: 2, ft: 4, fg_pct: 0.7 },
    ];
    for player in ["ablea01", "bakerb01", "colec01", "dunnd01"] {
        for line in &near_misses {
            insert_game(pool, player, day, line).await;
            day += 1;
        }
    }

    insert_game(pool, "ghost01", day, &triple(0, 0, 0.40)).await;
}

async fn seed_season_totals(pool: &SqlitePool) {
    // (player, season, games, pts, ast, trb, stl, blk)
    let rows = [
        ("ablea01", "2024-25", 60, 1800, 480, 600, 90, 30),
        ("bakerb01", "2024-25", 70, 1750, 700, 350, 140, 70),
        ("bakerb01", "2023-24", 10, 400, 50, 50, 10, 5),
        ("colec01", "2024-25", 10, 500, 20, 80, 5, 40),
        ("colec01", "2023-24", 5, 100, 5, 20, 1, 10),
        ("dunnd01", "2024-25", 21, 420, 63, 105, 21, 21),
    ];
    for (id, season, games, pts, ast, trb, stl, blk) in rows {
        sqlx::query(
            "INSERT INTO player_season_totals \
             (player_id, season, games, minutes_played, pts, ast, trb, stl, blk, fg, fga) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(season)
        .bind(games)
        .bind(games * 30)
        .bind(pts)
        .bind(ast)
        .bind(trb)
        .bind(stl)
        .bind(blk)
        .bind(pts / 3)
        .bind(pts / 2)
        .execute(pool)
        .await
        .expect("seed season totals");
    }

    sqlx::query(
        "INSERT INTO player_advanced_stats (player_id, season, games, per, ts_pct, ws) \
         VALUES ('ablea01', '2024-25', 60, 27.5, 0.61, 11.2)",
    )
    .execute(pool)
    .await
    .expect("seed advanced stats");
}
