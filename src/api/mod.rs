// HTTP API: the rendered leaderboard page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use maud::{html, Markup, DOCTYPE};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::db::LeaderboardEntry;
use crate::leaderboard::Leaderboard;

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub leaderboard: Arc<Leaderboard>,
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(leaderboard: Arc<Leaderboard>) -> Router {
    let state = AppState { leaderboard };

    Router::new()
        .route("/leaderboard", get(show_leaderboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Leaderboard handler ──────────────────────────────────────────────

async fn show_leaderboard(State(state): State<AppState>) -> impl IntoResponse {
    match state.leaderboard.fetch_all().await {
        Ok(entries) => Html(render_leaderboard(&entries).into_string()).into_response(),
        Err(e) => {
            tracing::error!("Fetching leaderboard failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Render entries as a full HTML page with a single table.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                title { "Leaderboard" }
            }
            body {
                h1 { "Leaderboard" }
                table border="1" {
                    tr {
                        th { "UserName" }
                        th { "Age" }
                        th { "Score" }
                    }
                    @for entry in entries {
                        tr {
                            td { (entry.username) }
                            td { (entry.age) }
                            td { (entry.score) }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, age: i64, score: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            username: name.to_string(),
            age,
            score,
        }
    }

    #[test]
    fn test_render_header_then_rows_in_order() {
        let page =
            render_leaderboard(&[entry("Bob", 22, 45), entry("Alice", 30, 12)]).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Leaderboard</title>"));
        assert!(page.contains("<tr><th>UserName</th><th>Age</th><th>Score</th></tr>"));

        let header = page.find("<th>UserName</th>").unwrap();
        let bob = page.find("<tr><td>Bob</td><td>22</td><td>45</td></tr>").unwrap();
        let alice = page.find("<tr><td>Alice</td><td>30</td><td>12</td></tr>").unwrap();
        assert!(header < bob && bob < alice);
    }

    #[test]
    fn test_render_empty_table() {
        let page = render_leaderboard(&[]).into_string();
        assert!(page.contains("<th>Score</th>"));
        assert!(!page.contains("<td>"));
    }

    #[test]
    fn test_render_escapes_usernames() {
        let page = render_leaderboard(&[entry("<b>eve</b>", 40, 3)]).into_string();
        assert!(!page.contains("<b>eve</b>"));
        assert!(page.contains("&lt;b&gt;eve&lt;/b&gt;"));
    }
}
