pub mod leaderboard;
pub mod users;
