//! CLI argument definitions and parsing.

pub mod types;

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use types::{ids::LeagueId, time::ScoringPeriod};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import a league's first season (league, managers, franchises) from ESPN.
    ///
    /// Re-running is safe: rows are matched by name and only created when missing.
    Import {
        /// ESPN league ID.
        #[clap(long, short)]
        league_id: LeagueId,

        /// Scoring period ID (optional).
        #[clap(long)]
        scoring_period_id: Option<ScoringPeriod>,
    },

    /// Fetch league history from ESPN and print a per-season summary.
    History {
        /// ESPN league ID.
        #[clap(long, short)]
        league_id: LeagueId,

        /// Scoring period ID (optional).
        #[clap(long)]
        scoring_period_id: Option<ScoringPeriod>,

        /// Print the raw JSON payload instead of a summary.
        #[clap(long)]
        json: bool,
    },

    /// Create the database tables if they don't exist.
    InitDb {
        /// Drop every table before recreating it.
        #[clap(long)]
        reset: bool,
    },

    /// Serve the read-only REST API.
    Serve {
        /// Address to bind (or set `FFL_HISTORY_BIND`).
        #[clap(long)]
        bind: Option<SocketAddr>,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "ffl-history", about = "Fantasy league history records")]
pub struct FflHistory {
    /// SQLite database path (or set `FFL_HISTORY_DATABASE`).
    #[clap(long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable debug logging.
    #[clap(long, global = true)]
    pub debug: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
