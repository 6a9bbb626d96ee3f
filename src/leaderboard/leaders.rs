use serde::Serialize;

use crate::types::LeaderboardEntry;

/// Per-game averages with season and all-time leader boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderStat {
    Points,
    Assists,
    Rebounds,
    Steals,
    Blocks,
}

impl LeaderStat {
    pub const ALL: [LeaderStat; 5] = [
        LeaderStat::Points,
        LeaderStat::Assists,
        LeaderStat::Rebounds,
        LeaderStat::Steals,
        LeaderStat::Blocks,
    ];

    pub fn key(self) -> &'static str {
        match self {
            LeaderStat::Points => "ppg",
            LeaderStat::Assists => "apg",
            LeaderStat::Rebounds => "rpg",
            LeaderStat::Steals => "spg",
            LeaderStat::Blocks => "bpg",
        }
    }

    /// Column in `player_season_per_game`.
    pub fn season_column(self) -> &'static str {
        match self {
            LeaderStat::Points => "pts_per_g",
            LeaderStat::Assists => "ast_per_g",
            LeaderStat::Rebounds => "trb_per_g",
            LeaderStat::Steals => "stl_per_g",
            LeaderStat::Blocks => "blk_per_g",
        }
    }

    /// Column in `player_career_averages`.
    pub fn career_column(self) -> &'static str {
        match self {
            LeaderStat::Points => "career_pts_per_g",
            LeaderStat::Assists => "career_ast_per_g",
            LeaderStat::Rebounds => "career_trb_per_g",
            LeaderStat::Steals => "career_stl_per_g",
            LeaderStat::Blocks => "career_blk_per_g",
        }
    }
}

/// One board per [`LeaderStat`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatLeaders {
    pub ppg: Vec<LeaderboardEntry>,
    pub apg: Vec<LeaderboardEntry>,
    pub rpg: Vec<LeaderboardEntry>,
    pub spg: Vec<LeaderboardEntry>,
    pub bpg: Vec<LeaderboardEntry>,
}

impl StatLeaders {
    pub fn set(&mut self, stat: LeaderStat, entries: Vec<LeaderboardEntry>) {
        let slot = match stat {
            LeaderStat::Points => &mut self.ppg,
            LeaderStat::Assists => &mut self.apg,
            LeaderStat::Rebounds => &mut self.rpg,
            LeaderStat::Steals => &mut self.spg,
            LeaderStat::Blocks => &mut self.bpg,
        };
        *slot = entries;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadersResponse {
    pub season: String,
    pub current_season: StatLeaders,
    pub all_time: StatLeaders,
}
