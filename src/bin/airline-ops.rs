//! airline-ops CLI - interactive console for the airline operations database
//!
//! Usage: `airline-ops <dbname> <port> <user> [--host HOST] [--password PASSWORD]`

use clap::Parser;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use airline_ops::{App, Cli, ConnectionConfig, Console, Database};

fn main() {
    // Logs go to stderr so they never mix with the menu on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = ConnectionConfig::from_cli(cli);

    print!("Connecting to database...");
    println!("Connection URL: {}\n", config.display_url());
    io::stdout().flush().ok();

    let db = match Database::connect(&config) {
        Ok(db) => {
            println!("Done");
            db
        }
        Err(e) => {
            eprintln!("Error - Unable to Connect to Database: {}", e);
            println!("Make sure you started postgres on this machine");
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let console = Console::new(stdin.lock(), io::stdout());

    if let Err(e) = App::new(db, console).run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
