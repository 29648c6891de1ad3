pub mod category;
pub mod entry;
pub mod leaderboard;
pub mod pair;
pub mod race;
