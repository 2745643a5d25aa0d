//! # airline-ops: Interactive Console for an Airline Operations Database
//!
//! A menu-driven front end over a PostgreSQL database of planes, pilots,
//! flights, technicians and reservations.
//!
//! ## Features
//!
//! - **Single session**: one connection opened at startup, released when the menu exits
//! - **Statement executor**: update, print, collect, count and sequence lookups, all parameterized
//! - **Entity handlers**: add planes, pilots, flights and technicians; the generated key
//!   comes back from `RETURNING`
//! - **Reports**: seat availability, repair counts per plane and per year, passengers by
//!   reservation status
//! - **Bookings**: reserve a seat, or waitlist when the flight is full
//!
//! ## Example
//!
//! ```ignore
//! use airline_ops::{App, ConnectionConfig, Console, Database};
//!
//! let db = Database::connect(&config)?;
//! let stdin = std::io::stdin();
//! App::new(db, Console::new(stdin.lock(), std::io::stdout())).run()?;
//! ```

// Configuration and errors
pub mod config;
pub mod error;

// Database access
pub mod database;
pub mod executor;
pub mod models;
pub mod schema;
pub mod store;

// Interactive front end
pub mod app;
pub mod console;
pub mod handlers;
pub mod menu;

// Re-export key types
pub use app::App;
pub use config::{Cli, ConnectionConfig};
pub use console::Console;
pub use database::Database;
pub use error::{ConsoleError, DbError, HandlerError};
pub use executor::{QueryExecutor, ResultSet, SqlParam};
pub use menu::{MenuChoice, MenuState};
pub use models::{NewFlight, NewPilot, NewPlane, NewReservation, NewTechnician, ReservationStatus};
pub use store::AirlineStore;
