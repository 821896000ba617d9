//! Fantasy League History
//!
//! Record-keeping for a fantasy football league: a SQLite schema of leagues,
//! seasons, franchises, managers and games, an importer that pulls a league's
//! first season from the ESPN Fantasy API, and a small read-only REST API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ffl_history::{config::EspnCredentials, espn::EspnClient, import::LeagueImporter};
//! use ffl_history::{storage::LedgerDatabase, LeagueId};
//!
//! # async fn example() -> ffl_history::Result<()> {
//! let mut db = LedgerDatabase::open(std::path::Path::new("ledger.db"))?;
//! let importer = LeagueImporter::new(EspnClient::new(&EspnCredentials::from_env())?);
//!
//! let summary = importer
//!     .import_league_first_season(&mut db, LeagueId::new(777493), None)
//!     .await?;
//! println!("{} ({})", summary.league.name, summary.season.year);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FFL_HISTORY_DATABASE=./ledger.db
//! export ESPN_SWID='{...}'
//! export ESPN_S2='...'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod espn;
pub mod import;
pub mod storage;
pub mod tracing_setup;

// Re-export commonly used types
pub use cli::types::{ids::LeagueId, time::ScoringPeriod, time::Season};
pub use error::{HistoryError, Result};
pub use import::{ImportSummary, LeagueImporter};
