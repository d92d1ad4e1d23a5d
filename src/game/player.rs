use serde::{Deserialize, Serialize};

/// A registered participant. Score starts at 0 and only the simulator
/// changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub age: i64,
    pub score: i64,
}

impl Player {
    pub fn new(username: impl Into<String>, age: i64) -> Self {
        Self {
            username: username.into(),
            age,
            score: 0,
        }
    }
}

/// One match worth of input: the roster and how many rounds to play.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub players: Vec<Player>,
    pub rounds: i64,
}

impl MatchRequest {
    pub fn new(players: Vec<Player>, rounds: i64) -> Self {
        Self { players, rounds }
    }
}
