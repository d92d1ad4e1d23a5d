// Application configuration, loaded from environment variables and CLI flags.

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database URL (`postgres://...` or `sqlite:...`).
    pub database_url: String,
    /// Maximum pooled database connections.
    pub max_connections: u32,
    /// Address to bind the HTTP server to.
    pub bind_addr: String,
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Fixed RNG seed for a reproducible match.
    pub seed: Option<u64>,
}

const DEFAULT_DATABASE_URL: &str = "sqlite:leaderboard.db?mode=rwc";

impl Config {
    /// Load configuration from environment variables and CLI arguments.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - full connection string, wins over everything below
    /// - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` - Postgres
    ///   connection parts, used when `DB_HOST` is set
    /// - `DB_MAX_CONNECTIONS` - pool size (default: 5)
    /// - `BIND_ADDR` - listen address (default: `0.0.0.0`)
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `MATCH_SEED` - RNG seed for the match
    ///
    /// CLI flags:
    /// - `--port <PORT>` - Override the port
    /// - `--seed <SEED>` - Override the seed
    pub fn load() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::from_sources(&args, |key| std::env::var(key).ok())
    }

    pub fn from_sources<F>(args: &[String], env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = env("DATABASE_URL")
            .or_else(|| Self::postgres_url(&env))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = env("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(5);

        let bind_addr = env("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());

        // CLI flag takes precedence, then env var, then default
        let port = Self::parse_cli_value(args, "--port")
            .and_then(|v| v.parse().ok())
            .or_else(|| env("PORT").and_then(|v| v.parse().ok()))
            .unwrap_or(8080);

        let seed = Self::parse_cli_value(args, "--seed")
            .and_then(|v| v.parse().ok())
            .or_else(|| env("MATCH_SEED").and_then(|v| v.parse().ok()));

        Config {
            database_url,
            max_connections,
            bind_addr,
            port,
            seed,
        }
    }

    fn postgres_url<F>(env: &F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = env("DB_HOST")?;
        let port = env("DB_PORT").unwrap_or_else(|| "5432".to_string());
        let user = env("DB_USER").unwrap_or_else(|| "postgres".to_string());
        let password = env("DB_PASSWORD").unwrap_or_default();
        let name = env("DB_NAME").unwrap_or_else(|| "postgres".to_string());
        Some(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
    }

    /// Database URL with any password replaced, for logging.
    pub fn redacted_database_url(&self) -> String {
        let Some((scheme, rest)) = self.database_url.split_once("://") else {
            return self.database_url.clone();
        };
        let Some((credentials, location)) = rest.rsplit_once('@') else {
            return self.database_url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:***@{location}"),
            None => self.database_url.clone(),
        }
    }

    /// Parse a CLI flag value like `--port 8080`.
    fn parse_cli_value(args: &[String], flag: &str) -> Option<String> {
        args.windows(2).find_map(|pair| {
            if pair[0] == flag {
                Some(pair[1].clone())
            } else {
                None
            }
        })
    }
}
