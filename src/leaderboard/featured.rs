use serde::Serialize;

use crate::error::Result;
use crate::leaderboard::predicate::validate_filter;
use crate::types::{LeaderboardEntry, StatFilter, StatFilterInput};

/// A statically configured leaderboard shown on the landing page.
#[derive(Debug, Clone, Copy)]
pub struct FeaturedBoard {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// (stat, operator, value)
    pub filters: &'static [(&'static str, &'static str, f64)],
}

pub const FEATURED_LEADERBOARDS: &[FeaturedBoard] = &[
    FeaturedBoard {
        id: "triple-double-30-less-than-8-ft",
        title: "30+ Point Triple-Double (less than 8 FT)",
        description: "Most games with 30+ pts, 10+ trb, 10+ ast, and fewer than 8 free throws made",
        filters: &[("pts", ">=", 30.0), ("trb", ">=", 10.0), ("ast", ">=", 10.0), ("ft", "<", 8.0)],
    },
    FeaturedBoard {
        id: "triple-double-30-with-2plus-stl",
        title: "30+ Point Triple-Double (with 2+ STL)",
        description: "Most games with 30+ pts, 10+ trb, 10+ ast, and more than 1 stl",
        filters: &[("pts", ">=", 30.0), ("trb", ">=", 10.0), ("ast", ">=", 10.0), ("stl", ">", 1.0)],
    },
    FeaturedBoard {
        id: "triple-double-30-with-55plus-fg-pct",
        title: "30+ Point Triple-Double (with 55%+ FG%)",
        description: "Most games with 30+ pts, 10+ trb, 10+ ast, and 0.55+ FG%",
        filters: &[("pts", ">=", 30.0), ("trb", ">=", 10.0), ("ast", ">=", 10.0), ("fg_pct", ">=", 0.55)],
    },
];

impl FeaturedBoard {
    pub fn find(id: &str) -> Option<&'static FeaturedBoard> {
        FEATURED_LEADERBOARDS.iter().find(|b| b.id == id)
    }

    /// Validated through the same path as user-submitted filters.
    pub fn stat_filters(&self) -> Result<Vec<StatFilter>> {
        self.filters
            .iter()
            .map(|&(stat, operator, value)| {
                validate_filter(&StatFilterInput {
                    stat: stat.to_string(),
                    operator: operator.to_string(),
                    value: serde_json::json!(value),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedResult {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Empty when the board failed validation.
    pub filters: Vec<StatFilter>,
    /// Empty when the board could not be resolved.
    pub results: Vec<LeaderboardEntry>,
}
