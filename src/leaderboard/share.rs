//! Shareable leaderboard ids: base64 of the JSON request config.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::Serialize;

use crate::types::{LeaderboardRequest, LeaderboardRequestInput, StatFilter};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SharedConfig<'a> {
    title: &'a str,
    top_n: usize,
    stat_filters: &'a [StatFilter],
}

/// URL-safe, unpadded, so the id fits in a path segment.
pub fn encode_id(req: &LeaderboardRequest) -> String {
    let config = SharedConfig {
        title: &req.title,
        top_n: req.top_n,
        stat_filters: &req.stat_filters,
    };
    // Serialising plain strings and finite floats cannot fail.
    let json = serde_json::to_vec(&config).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode an id back into an unvalidated config. Accepts the standard and
/// URL-safe alphabets, padded or not. `None` if the id is not base64 JSON.
pub fn decode_id(id: &str) -> Option<LeaderboardRequestInput> {
    let id = id.trim();
    let bytes = [URL_SAFE_NO_PAD, URL_SAFE, STANDARD, STANDARD_NO_PAD]
        .iter()
        .find_map(|engine| engine.decode(id).ok())?;
    serde_json::from_slice(&bytes).ok()
}
