pub mod models;
pub mod players;
pub mod predictions;
pub mod stats;
