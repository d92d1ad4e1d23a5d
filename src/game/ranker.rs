use super::player::Player;

/// Sort the roster by score, highest first.
///
/// The sort is stable: players with equal scores keep their roster order.
pub fn rank(players: &mut [Player]) {
    players.sort_by(|a, b| b.score.cmp(&a.score));
}
