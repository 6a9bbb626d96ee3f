use std::collections::HashMap;

/// One player's number of qualifying records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedCount {
    pub player_id: String,
    pub count: u64,
}

/// Count qualifying records per player, order by count descending and keep
/// the first `top_n`.
///
/// Ties keep the order in which each player was first seen in `player_ids`;
/// the sort is stable, so callers control tie-breaks through input order.
/// Returns exactly `min(top_n, distinct players)` entries.
pub fn rank_by_count<I, S>(player_ids: I, top_n: usize) -> Vec<RankedCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<RankedCount> = Vec::new();

    for id in player_ids {
        let id = id.as_ref();
        match slots.get(id) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(id.to_string(), counts.len());
                counts.push(RankedCount {
                    player_id: id.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}
