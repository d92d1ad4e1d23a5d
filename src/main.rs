use std::io;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shootout::api;
use shootout::config::Config;
use shootout::db::Database;
use shootout::game::{self, MatchRequest, Player};
use shootout::leaderboard::Leaderboard;
use shootout::registry::Registry;

fn fatal(context: &str, err: impl std::fmt::Display) -> ! {
    tracing::error!("{context}: {err}");
    std::process::exit(1);
}

/// Ask for the player and round counts, then register each player.
fn register<R: io::BufRead, W: io::Write>(
    registry: &mut Registry<R, W>,
) -> io::Result<(Vec<Player>, i64)> {
    let count = registry.read_count("Players")?;
    let rounds = registry.read_count("Rounds")?;
    let players = registry.register_players(count as usize)?;
    Ok((players, rounds))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();

    let db = match Database::connect(&config.database_url, config.max_connections).await {
        Ok(db) => Arc::new(db),
        Err(e) => fatal("Could not connect to the database", e),
    };
    tracing::info!(database = %config.redacted_database_url(), "Connected to database");

    let (players, rounds) = match register(&mut Registry::new(io::stdin().lock(), io::stdout())) {
        Ok(roster) => roster,
        Err(e) => fatal("Could not read players", e),
    };

    tracing::info!(players = players.len(), rounds, "Starting match");
    let results = match game::play_match(MatchRequest::new(players, rounds), config.seed).await {
        Ok(results) => results,
        Err(e) => fatal("Match failed", e),
    };
    for (place, p) in results.iter().enumerate() {
        tracing::info!(place = place + 1, player = %p.username, score = p.score, "Final standing");
    }

    let leaderboard = Arc::new(Leaderboard::new(db.clone()));
    if let Err(e) = leaderboard.update(&results).await {
        fatal("Could not update leaderboard", e);
    }

    let app = api::router(leaderboard);

    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => fatal(&format!("Failed to bind to {addr}"), e),
    };

    tracing::info!("Leaderboard served at http://{addr}/leaderboard");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        fatal("Failed to start server", e);
    }

    db.close().await;
    tracing::info!("Shut down");
}
