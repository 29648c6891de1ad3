pub mod categories;
pub mod entries;
pub mod leaderboard;
pub mod races;
pub mod registrations;
