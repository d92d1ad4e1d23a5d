// Shot-by-shot match simulation.
//
// A round is split into mini-rounds, each mini-round into shots. Every
// player takes every shot independently, so the outcome for one player
// never depends on another.

use rand::Rng;

use super::player::{MatchRequest, Player};

pub const MINI_ROUNDS_PER_ROUND: i64 = 3;
pub const SHOTS_PER_MINI_ROUND: i64 = 3;
pub const POINTS_PER_HIT: i64 = 3;

/// Probability that a single shot scores.
const HIT_CHANCE: f64 = 0.5;

/// Take one shot: `POINTS_PER_HIT` on a hit, 0 on a miss.
pub fn take_shot<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    if rng.gen_bool(HIT_CHANCE) {
        POINTS_PER_HIT
    } else {
        0
    }
}

/// Number of shots each player takes over `rounds` rounds.
pub fn shots_per_player(rounds: i64) -> i64 {
    rounds.max(0) * MINI_ROUNDS_PER_ROUND * SHOTS_PER_MINI_ROUND
}

/// Highest score a player can reach over `rounds` rounds.
pub fn max_score(rounds: i64) -> i64 {
    shots_per_player(rounds) * POINTS_PER_HIT
}

/// Play every round of the match and return the roster with scores added.
///
/// Roster order is preserved. A non-positive round count plays nothing.
pub fn simulate<R: Rng + ?Sized>(request: MatchRequest, rng: &mut R) -> Vec<Player> {
    let MatchRequest {
        mut players,
        rounds,
    } = request;

    for _round in 0..rounds.max(0) {
        for _mini_round in 0..MINI_ROUNDS_PER_ROUND {
            for _shot in 0..SHOTS_PER_MINI_ROUND {
                for player in players.iter_mut() {
                    player.score += take_shot(rng);
                }
            }
        }
    }

    players
}
