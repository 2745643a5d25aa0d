//! Connection settings.
//!
//! The positional arguments mirror the classic `<dbname> <port> <user>`
//! invocation. Host and password are optional and resolved with the
//! precedence: CLI flag > environment variable > default.

use clap::Parser;

/// Environment variable consulted when `--host` is not given.
pub const HOST_ENV: &str = "AIRLINE_DB_HOST";
/// Environment variable consulted when `--password` is not given.
pub const PASSWORD_ENV: &str = "AIRLINE_DB_PASSWORD";

const DEFAULT_HOST: &str = "localhost";

#[derive(Debug, Parser)]
#[command(name = "airline-ops")]
#[command(version, long_about = None)]
#[command(about = "Interactive console for the airline operations database")]
pub struct Cli {
    /// Name of the database to open
    pub dbname: String,

    /// Port the PostgreSQL server listens on
    pub port: u16,

    /// Database user
    pub user: String,

    /// Database host (falls back to AIRLINE_DB_HOST, then localhost)
    #[arg(long)]
    pub host: Option<String>,

    /// Database password (falls back to AIRLINE_DB_PASSWORD, then empty)
    #[arg(long)]
    pub password: Option<String>,
}

/// Resolved settings for the single database session.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl ConnectionConfig {
    /// Build the config from parsed arguments, filling gaps from the environment.
    pub fn from_cli(cli: Cli) -> Self {
        ConnectionConfig {
            host: pick(cli.host, std::env::var(HOST_ENV).ok(), DEFAULT_HOST),
            port: cli.port,
            dbname: cli.dbname,
            user: cli.user,
            password: pick(cli.password, std::env::var(PASSWORD_ENV).ok(), ""),
        }
    }

    /// libpq keyword/value connection string with every value quoted.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            quote_value(&self.host),
            self.port,
            quote_value(&self.dbname),
            quote_value(&self.user),
            quote_value(&self.password),
        )
    }

    /// URL shown to the operator. Never includes the password.
    pub fn display_url(&self) -> String {
        format!(
            "postgresql://{}@{}:{}/{}",
            self.user, self.host, self.port, self.dbname
        )
    }
}

fn pick(cli_value: Option<String>, env_value: Option<String>, default: &str) -> String {
    cli_value
        .or(env_value)
        .unwrap_or_else(|| default.to_string())
}

fn quote_value(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}
