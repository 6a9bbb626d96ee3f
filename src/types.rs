use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than `asc`/`desc` falls back to `default`.
    pub fn parse_or(s: Option<&str>, default: SortOrder) -> SortOrder {
        match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("asc") => SortOrder::Asc,
            Some("desc") => SortOrder::Desc,
            _ => default,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Escape `%`, `_` and `\` for a `LIKE ... ESCAPE '\'` substring match.
pub fn like_contains(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Stat keys
// ---------------------------------------------------------------------------

/// Per-game columns a custom leaderboard may filter on. The only identifiers
/// ever interpolated into leaderboard SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Pts,
    Trb,
    Ast,
    Stl,
    Blk,
    Fg,
    Fga,
    Fg3,
    Fg3a,
    Ft,
    Fta,
    Tov,
    Pf,
    FgPct,
}

impl StatKey {
    pub const ALL: [StatKey; 14] = [
        StatKey::Pts,
        StatKey::Trb,
        StatKey::Ast,
        StatKey::Stl,
        StatKey::Blk,
        StatKey::Fg,
        StatKey::Fga,
        StatKey::Fg3,
        StatKey::Fg3a,
        StatKey::Ft,
        StatKey::Fta,
        StatKey::Tov,
        StatKey::Pf,
        StatKey::FgPct,
    ];

    /// Column name in `player_game_logs`.
    pub fn column(self) -> &'static str {
        match self {
            StatKey::Pts => "pts",
            StatKey::Trb => "trb",
            StatKey::Ast => "ast",
            StatKey::Stl => "stl",
            StatKey::Blk => "blk",
            StatKey::Fg => "fg",
            StatKey::Fga => "fga",
            StatKey::Fg3 => "fg3",
            StatKey::Fg3a => "fg3a",
            StatKey::Ft => "ft",
            StatKey::Fta => "fta",
            StatKey::Tov => "tov",
            StatKey::Pf => "pf",
            StatKey::FgPct => "fg_pct",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.column() == s)
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

// ---------------------------------------------------------------------------
// Filter operators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<=")]
    Lte,
    #[serde(rename = "<")]
    Lt,
}

impl CompareOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Gte => ">=",
            CompareOp::Gt => ">",
            CompareOp::Eq => "=",
            CompareOp::Lte => "<=",
            CompareOp::Lt => "<",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            ">=" => Some(CompareOp::Gte),
            ">" => Some(CompareOp::Gt),
            "=" => Some(CompareOp::Eq),
            "<=" => Some(CompareOp::Lte),
            "<" => Some(CompareOp::Lt),
            _ => None,
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

// ---------------------------------------------------------------------------
// Leaderboards
// ---------------------------------------------------------------------------

/// One validated clause of a conjunctive leaderboard predicate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatFilter {
    pub stat: StatKey,
    pub operator: CompareOp,
    pub value: f64,
}

impl std::fmt::Display for StatFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.stat, self.operator, self.value)
    }
}

/// A filter exactly as submitted. Validated into a [`StatFilter`] before any query runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatFilterInput {
    #[serde(default)]
    pub stat: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Body of `POST /api/leaderboards/custom`, and the JSON inside a shareable id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRequestInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<i64>,
    #[serde(default)]
    pub stat_filters: Option<Vec<StatFilterInput>>,
}

/// A validated custom leaderboard request.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRequest {
    pub title: String,
    pub top_n: usize,
    pub stat_filters: Vec<StatFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub player_id: String,
    pub player_name: String,
    pub value: f64,
    /// 1-based position in the ranked list.
    pub rank: usize,
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionType {
    Season,
    Game,
}

impl PredictionType {
    pub fn as_str(self) -> &'static str {
        match self {
            PredictionType::Season => "season",
            PredictionType::Game => "game",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "season" => Some(PredictionType::Season),
            "game" => Some(PredictionType::Game),
            _ => None,
        }
    }
}

impl std::fmt::Display for PredictionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    MoreThan,
    LessThan,
    AtLeast,
    AtMost,
    Exactly,
}

impl ComparisonOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOperator::MoreThan => "more_than",
            ComparisonOperator::LessThan => "less_than",
            ComparisonOperator::AtLeast => "at_least",
            ComparisonOperator::AtMost => "at_most",
            ComparisonOperator::Exactly => "exactly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "more_than" => Some(ComparisonOperator::MoreThan),
            "less_than" => Some(ComparisonOperator::LessThan),
            "at_least" => Some(ComparisonOperator::AtLeast),
            "at_most" => Some(ComparisonOperator::AtMost),
            "exactly" => Some(ComparisonOperator::Exactly),
            _ => None,
        }
    }

    /// Phrase used in generated prediction text.
    pub fn phrase(self) -> &'static str {
        match self {
            ComparisonOperator::MoreThan => "more than",
            ComparisonOperator::LessThan => "less than",
            ComparisonOperator::AtLeast => "at least",
            ComparisonOperator::AtMost => "at most",
            ComparisonOperator::Exactly => "exactly",
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted prediction plus its evaluated progress.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub id: String,
    pub username: String,
    pub prediction_type: PredictionType,
    pub prediction_text: String,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub stat_type: String,
    pub comparison_operator: ComparisonOperator,
    pub target_value: f64,
    pub current_value: f64,
    pub season: Option<String>,
    pub game_id: Option<String>,
    pub game_date: Option<String>,
    pub is_after_start: bool,
    pub created_at: String,
    pub updated_at: String,
    /// Percent complete, 0 to 100.
    pub progress: f64,
    pub is_met: bool,
}

/// Body of `POST /api/predictions`. Every field optional so missing
/// required fields surface as a 400 rather than a deserialisation error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePredictionInput {
    pub prediction_type: Option<String>,
    pub player_id: Option<String>,
    pub player_name: Option<String>,
    pub stat_type: Option<String>,
    pub comparison_operator: Option<String>,
    pub target_value: Option<f64>,
    pub season: Option<String>,
    pub game_id: Option<String>,
    pub game_date: Option<String>,
}
