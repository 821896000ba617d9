//! Natural-key lookups, inserts, and read queries
//!
//! The find/insert functions take a plain `&Connection` so the importer can
//! run them on a `Transaction` (which derefs to one).

use super::{models::*, schema::LedgerDatabase};
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;

const FRANCHISE_SEASON_COLUMNS: &str = "id, franchise_id, season_id, manager_id,
    regular_wins, regular_losses, playoff_winners_wins, playoff_winners_losses,
    playoff_losers_wins, playoff_losers_losses, points_for, points_against,
    final_standing, prize_money, won_championship, won_draft_lottery, lost_beer_mile";

pub fn find_league_by_name(conn: &Connection, name: &str) -> Result<Option<League>> {
    let league = conn
        .query_row(
            "SELECT id, name, settings FROM league WHERE name = ? ORDER BY id LIMIT 1",
            params![name],
            row_to_league,
        )
        .optional()?;
    Ok(league)
}

pub fn insert_league(conn: &Connection, name: &str, settings: Option<&Value>) -> Result<League> {
    conn.execute(
        "INSERT INTO league (name, settings) VALUES (?, ?)",
        params![name, settings],
    )?;
    Ok(League {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        settings: settings.cloned(),
    })
}

pub fn find_season(conn: &Connection, league_id: i64, year: u16) -> Result<Option<Season>> {
    let season = conn
        .query_row(
            "SELECT id, league_id, year, start_date, end_date
             FROM season WHERE league_id = ? AND year = ?",
            params![league_id, year],
            row_to_season,
        )
        .optional()?;
    Ok(season)
}

/// Insert a season with no start/end dates
pub fn insert_season(conn: &Connection, league_id: i64, year: u16) -> Result<Season> {
    conn.execute(
        "INSERT INTO season (league_id, year) VALUES (?, ?)",
        params![league_id, year],
    )?;
    Ok(Season {
        id: conn.last_insert_rowid(),
        league_id,
        year,
        start_date: None,
        end_date: None,
    })
}

pub fn find_manager_by_name(conn: &Connection, name: &str) -> Result<Option<Manager>> {
    let manager = conn
        .query_row(
            "SELECT id, name FROM manager WHERE name = ? ORDER BY id LIMIT 1",
            params![name],
            row_to_manager,
        )
        .optional()?;
    Ok(manager)
}

pub fn insert_manager(conn: &Connection, name: &str) -> Result<Manager> {
    conn.execute("INSERT INTO manager (name) VALUES (?)", params![name])?;
    Ok(Manager {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn find_franchise(conn: &Connection, league_id: i64, name: &str) -> Result<Option<Franchise>> {
    let franchise = conn
        .query_row(
            "SELECT id, league_id, name FROM franchise
             WHERE league_id = ? AND name = ? ORDER BY id LIMIT 1",
            params![league_id, name],
            row_to_franchise,
        )
        .optional()?;
    Ok(franchise)
}

pub fn insert_franchise(conn: &Connection, league_id: i64, name: &str) -> Result<Franchise> {
    conn.execute(
        "INSERT INTO franchise (league_id, name) VALUES (?, ?)",
        params![league_id, name],
    )?;
    Ok(Franchise {
        id: conn.last_insert_rowid(),
        league_id,
        name: name.to_string(),
    })
}

pub fn find_franchise_season(
    conn: &Connection,
    franchise_id: i64,
    season_id: i64,
) -> Result<Option<FranchiseSeason>> {
    let franchise_season = conn
        .query_row(
            &format!(
                "SELECT {FRANCHISE_SEASON_COLUMNS} FROM franchise_season
                 WHERE franchise_id = ? AND season_id = ?"
            ),
            params![franchise_id, season_id],
            row_to_franchise_season,
        )
        .optional()?;
    Ok(franchise_season)
}

/// Insert a franchise-season with every stat at its default
pub fn insert_franchise_season(
    conn: &Connection,
    franchise_id: i64,
    season_id: i64,
    manager_id: i64,
) -> Result<FranchiseSeason> {
    conn.execute(
        "INSERT INTO franchise_season (franchise_id, season_id, manager_id) VALUES (?, ?, ?)",
        params![franchise_id, season_id, manager_id],
    )?;
    let id = conn.last_insert_rowid();
    let franchise_season = conn.query_row(
        &format!("SELECT {FRANCHISE_SEASON_COLUMNS} FROM franchise_season WHERE id = ?"),
        params![id],
        row_to_franchise_season,
    )?;
    Ok(franchise_season)
}

pub fn insert_player(
    conn: &Connection,
    name: &str,
    position: &str,
    nfl_team: Option<&str>,
) -> Result<Player> {
    conn.execute(
        "INSERT INTO player (name, position, nfl_team) VALUES (?, ?, ?)",
        params![name, position, nfl_team],
    )?;
    Ok(Player {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        position: position.to_string(),
        nfl_team: nfl_team.map(str::to_string),
    })
}

/// Insert a game; `game.id` is ignored and replaced by the generated one
pub fn insert_game(conn: &Connection, game: &Game) -> Result<Game> {
    conn.execute(
        "INSERT INTO game (season_id, week, game_type, franchise1_id, franchise2_id,
                           franchise1_score, franchise2_score, game_date)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            game.season_id,
            game.week,
            game.game_type.as_str(),
            game.franchise1_id,
            game.franchise2_id,
            game.franchise1_score,
            game.franchise2_score,
            game.game_date,
        ],
    )?;
    Ok(Game {
        id: conn.last_insert_rowid(),
        ..game.clone()
    })
}

/// Insert a lineup slot; `lineup.id` is ignored and replaced by the generated one
pub fn insert_lineup(conn: &Connection, lineup: &Lineup) -> Result<Lineup> {
    conn.execute(
        "INSERT INTO lineup (game_id, franchise_id, player_id, score, position)
         VALUES (?, ?, ?, ?, ?)",
        params![
            lineup.game_id,
            lineup.franchise_id,
            lineup.player_id,
            lineup.score,
            lineup.position,
        ],
    )?;
    Ok(Lineup {
        id: conn.last_insert_rowid(),
        ..lineup.clone()
    })
}

impl LedgerDatabase {
    pub fn list_leagues(&self) -> Result<Vec<League>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, settings FROM league ORDER BY id")?;
        let rows = stmt.query_map([], row_to_league)?;

        let mut leagues = Vec::new();
        for row in rows {
            leagues.push(row?);
        }
        Ok(leagues)
    }

    pub fn list_franchises(&self, league_id: i64) -> Result<Vec<Franchise>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, league_id, name FROM franchise WHERE league_id = ? ORDER BY id",
        )?;
        let rows = stmt.query_map(params![league_id], row_to_franchise)?;

        let mut franchises = Vec::new();
        for row in rows {
            franchises.push(row?);
        }
        Ok(franchises)
    }

    pub fn list_seasons(&self, league_id: i64) -> Result<Vec<Season>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, league_id, year, start_date, end_date
             FROM season WHERE league_id = ? ORDER BY year",
        )?;
        let rows = stmt.query_map(params![league_id], row_to_season)?;

        let mut seasons = Vec::new();
        for row in rows {
            seasons.push(row?);
        }
        Ok(seasons)
    }

    /// Franchise-seasons of one season with franchise and manager names
    pub fn list_franchise_seasons(&self, season_id: i64) -> Result<Vec<FranchiseSeasonView>> {
        let mut stmt = self.conn.prepare(
            "SELECT fs.id, f.id, f.name, m.id, m.name, s.year
             FROM franchise_season fs
             JOIN franchise f ON f.id = fs.franchise_id
             JOIN manager m ON m.id = fs.manager_id
             JOIN season s ON s.id = fs.season_id
             WHERE fs.season_id = ?
             ORDER BY f.name",
        )?;
        let rows = stmt.query_map(params![season_id], |row| {
            Ok(FranchiseSeasonView {
                id: row.get(0)?,
                franchise_id: row.get(1)?,
                franchise_name: row.get(2)?,
                manager_id: row.get(3)?,
                manager_name: row.get(4)?,
                year: row.get(5)?,
            })
        })?;

        let mut views = Vec::new();
        for row in rows {
            views.push(row?);
        }
        Ok(views)
    }

    /// Distinct franchises a player has appeared on a lineup for
    pub fn player_franchises(&self, player_id: i64) -> Result<Vec<Franchise>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT f.id, f.league_id, f.name
             FROM lineup l
             JOIN franchise f ON f.id = l.franchise_id
             WHERE l.player_id = ?
             ORDER BY f.id",
        )?;
        let rows = stmt.query_map(params![player_id], row_to_franchise)?;

        let mut franchises = Vec::new();
        for row in rows {
            franchises.push(row?);
        }
        Ok(franchises)
    }

    pub fn table_counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<u64> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Ok(n as u64)
        };

        Ok(TableCounts {
            leagues: count("league")?,
            seasons: count("season")?,
            managers: count("manager")?,
            franchises: count("franchise")?,
            franchise_seasons: count("franchise_season")?,
        })
    }
}

fn row_to_league(row: &Row) -> rusqlite::Result<League> {
    Ok(League {
        id: row.get(0)?,
        name: row.get(1)?,
        settings: row.get(2)?,
    })
}

fn row_to_season(row: &Row) -> rusqlite::Result<Season> {
    Ok(Season {
        id: row.get(0)?,
        league_id: row.get(1)?,
        year: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
    })
}

fn row_to_manager(row: &Row) -> rusqlite::Result<Manager> {
    Ok(Manager {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn row_to_franchise(row: &Row) -> rusqlite::Result<Franchise> {
    Ok(Franchise {
        id: row.get(0)?,
        league_id: row.get(1)?,
        name: row.get(2)?,
    })
}

fn row_to_franchise_season(row: &Row) -> rusqlite::Result<FranchiseSeason> {
    Ok(FranchiseSeason {
        id: row.get(0)?,
        franchise_id: row.get(1)?,
        season_id: row.get(2)?,
        manager_id: row.get(3)?,
        regular_wins: row.get(4)?,
        regular_losses: row.get(5)?,
        playoff_winners_wins: row.get(6)?,
        playoff_winners_losses: row.get(7)?,
        playoff_losers_wins: row.get(8)?,
        playoff_losers_losses: row.get(9)?,
        points_for: row.get(10)?,
        points_against: row.get(11)?,
        final_standing: row.get(12)?,
        prize_money: row.get(13)?,
        won_championship: row.get(14)?,
        won_draft_lottery: row.get(15)?,
        lost_beer_mile: row.get(16)?,
    })
}
