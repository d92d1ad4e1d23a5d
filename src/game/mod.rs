// Match play: simulation and ranking.

pub mod player;
pub mod ranker;
pub mod simulator;

use rand::rngs::StdRng;
use rand::SeedableRng;

pub use player::{MatchRequest, Player};

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("match task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Simulate and rank a match with the given RNG.
pub fn run_match<R: rand::Rng + ?Sized>(request: MatchRequest, rng: &mut R) -> Vec<Player> {
    let mut players = simulator::simulate(request, rng);
    ranker::rank(&mut players);
    players
}

/// Play one match on a dedicated blocking task and wait for its result.
///
/// With a seed the outcome is reproducible; without one the RNG is seeded
/// from OS entropy.
pub async fn play_match(
    request: MatchRequest,
    seed: Option<u64>,
) -> Result<Vec<Player>, GameError> {
    let handle = tokio::task::spawn_blocking(move || {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        run_match(request, &mut rng)
    });
    Ok(handle.await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_play_match_ranks_result() {
        let roster = vec![
            Player::new("Alice", 30),
            Player::new("Bob", 41),
            Player::new("Carol", 25),
        ];
        let players = play_match(MatchRequest::new(roster, 10), Some(5))
            .await
            .unwrap();
        assert_eq!(players.len(), 3);
        assert!(players.windows(2).all(|w| w[0].score >= w[1].score));
        for p in &players {
            assert_eq!(p.score % 3, 0);
            assert!(p.score <= 270);
        }
    }

    #[tokio::test]
    async fn test_play_match_seeded_is_reproducible() {
        let roster = vec![Player::new("Alice", 30), Player::new("Bob", 41)];
        let a = play_match(MatchRequest::new(roster.clone(), 6), Some(11))
            .await
            .unwrap();
        let b = play_match(MatchRequest::new(roster, 6), Some(11))
            .await
            .unwrap();
        assert_eq!(a, b);
    }
}
