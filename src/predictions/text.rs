use rand::Rng;

use crate::types::ComparisonOperator;

const ADJECTIVES: [&str; 20] = [
    "Swift", "Brave", "Clever", "Mighty", "Noble", "Quick", "Bold", "Sharp", "Wise", "Fierce",
    "Cool", "Epic", "Cosmic", "Turbo", "Ultra", "Alpha", "Stellar", "Legendary", "Dynamic",
    "Supreme",
];

const NOUNS: [&str; 20] = [
    "Eagle", "Tiger", "Dragon", "Phoenix", "Falcon", "Wolf", "Lion", "Hawk", "Panther", "Bear",
    "Viper", "Rhino", "Shark", "Raven", "Fox", "Cobra", "Stallion", "Jaguar", "Lynx", "Orca",
];

/// `AdjectiveNoun#### [anonymous]`, e.g. `SwiftEagle4782 [anonymous]`.
pub fn anonymous_username<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    let number: u16 = rng.gen_range(1000..=9999);
    format!("{adjective}{noun}{number} [anonymous]")
}

/// `total_points` → `Total Points`.
pub fn stat_label(stat_type: &str) -> String {
    stat_type
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human-readable prediction, e.g. `Alpha Able will score more than 25 Ppg`.
pub fn prediction_text(
    player_name: Option<&str>,
    stat_type: &str,
    op: ComparisonOperator,
    target: f64,
) -> String {
    let label = stat_label(stat_type);
    match player_name {
        Some(name) => format!("{name} will score {} {target} {label}", op.phrase()),
        None => format!("{} {target} {label}", op.phrase()),
    }
}
