pub mod api;
pub mod config;
pub mod db;
pub mod game;
pub mod leaderboard;
pub mod registry;
