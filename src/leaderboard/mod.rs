pub mod enrich;
pub mod featured;
pub mod leaders;
pub mod predicate;
pub mod ranking;
pub mod service;
pub mod share;

pub use featured::{FeaturedBoard, FEATURED_LEADERBOARDS};
pub use service::{validate_request, LeaderboardService};
