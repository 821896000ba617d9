//! Database schema and connection management

use crate::Result;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use tracing::debug;

/// Tables in dependency order; dropped in reverse.
const TABLES: [&str; 8] = [
    "league",
    "season",
    "manager",
    "franchise",
    "franchise_season",
    "game",
    "player",
    "lineup",
];

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS league (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    settings TEXT
);
CREATE INDEX IF NOT EXISTS idx_league_name ON league(name);

CREATE TABLE IF NOT EXISTS season (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    league_id INTEGER NOT NULL REFERENCES league(id),
    year INTEGER NOT NULL,
    start_date TEXT,
    end_date TEXT,
    CONSTRAINT unique_league_year UNIQUE (league_id, year)
);

CREATE TABLE IF NOT EXISTS manager (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_manager_name ON manager(name);

CREATE TABLE IF NOT EXISTS franchise (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    league_id INTEGER NOT NULL REFERENCES league(id),
    name TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_franchise_league_name ON franchise(league_id, name);

CREATE TABLE IF NOT EXISTS franchise_season (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    franchise_id INTEGER NOT NULL REFERENCES franchise(id),
    season_id INTEGER NOT NULL REFERENCES season(id),
    manager_id INTEGER NOT NULL REFERENCES manager(id),
    regular_wins INTEGER NOT NULL DEFAULT 0,
    regular_losses INTEGER NOT NULL DEFAULT 0,
    playoff_winners_wins INTEGER NOT NULL DEFAULT 0,
    playoff_winners_losses INTEGER NOT NULL DEFAULT 0,
    playoff_losers_wins INTEGER NOT NULL DEFAULT 0,
    playoff_losers_losses INTEGER NOT NULL DEFAULT 0,
    points_for REAL NOT NULL DEFAULT 0.0,
    points_against REAL NOT NULL DEFAULT 0.0,
    final_standing INTEGER,
    prize_money REAL NOT NULL DEFAULT 0.0,
    won_championship INTEGER NOT NULL DEFAULT 0,
    won_draft_lottery INTEGER NOT NULL DEFAULT 0,
    lost_beer_mile INTEGER NOT NULL DEFAULT 0,
    CONSTRAINT unique_franchise_season UNIQUE (franchise_id, season_id)
);

CREATE TABLE IF NOT EXISTS game (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    season_id INTEGER NOT NULL REFERENCES season(id),
    week INTEGER NOT NULL,
    game_type TEXT NOT NULL
        CHECK (game_type IN ('REGULAR', 'PLAYOFF_WINNERS', 'PLAYOFF_LOSERS')),
    franchise1_id INTEGER NOT NULL REFERENCES franchise(id),
    franchise2_id INTEGER NOT NULL REFERENCES franchise(id),
    franchise1_score REAL,
    franchise2_score REAL,
    game_date TEXT
);
CREATE INDEX IF NOT EXISTS idx_game_season_week ON game(season_id, week);

CREATE TABLE IF NOT EXISTS player (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    position TEXT NOT NULL,
    nfl_team TEXT
);
CREATE INDEX IF NOT EXISTS idx_player_name ON player(name);

CREATE TABLE IF NOT EXISTS lineup (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES game(id),
    franchise_id INTEGER NOT NULL REFERENCES franchise(id),
    player_id INTEGER NOT NULL REFERENCES player(id),
    score REAL,
    position TEXT,
    CONSTRAINT unique_game_franchise_player UNIQUE (game_id, franchise_id, player_id)
);
";

/// Connection to the league history database
pub struct LedgerDatabase {
    pub(crate) conn: Connection,
}

impl LedgerDatabase {
    /// Open (creating if needed) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Self::from_connection(Connection::open(path)?)
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create every table and index that doesn't exist yet
    pub fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Drop every table, then recreate the schema
    pub fn reset_schema(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        for table in TABLES.iter().rev() {
            debug!(table, "dropping table");
            tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
        }
        tx.execute_batch(SCHEMA_SQL)?;
        tx.commit()?;
        Ok(())
    }

    /// Begin a transaction; it rolls back when dropped without `commit`
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
