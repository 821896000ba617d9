//! Data models for the storage layer

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::HistoryError;

/// A fantasy league. `name` is the natural key used by the importer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: i64,
    pub name: String,
    /// ESPN settings object, stored verbatim
    pub settings: Option<Value>,
}

/// One year of a league. Unique per (league, year).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: i64,
    pub league_id: i64,
    pub year: u16,
    /// ISO-8601 date
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A person who runs a franchise for a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
    pub id: i64,
    pub name: String,
}

/// A team that persists across seasons of one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franchise {
    pub id: i64,
    pub league_id: i64,
    pub name: String,
}

/// Per-season record and manager assignment for a franchise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FranchiseSeason {
    pub id: i64,
    pub franchise_id: i64,
    pub season_id: i64,
    pub manager_id: i64,
    pub regular_wins: u32,
    pub regular_losses: u32,
    pub playoff_winners_wins: u32,
    pub playoff_winners_losses: u32,
    pub playoff_losers_wins: u32,
    pub playoff_losers_losses: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub final_standing: Option<u32>,
    pub prize_money: f64,
    pub won_championship: bool,
    pub won_draft_lottery: bool,
    pub lost_beer_mile: bool,
}

/// Franchise-season joined with the names a reader wants to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FranchiseSeasonView {
    pub id: i64,
    pub franchise_id: i64,
    pub franchise_name: String,
    pub manager_id: i64,
    pub manager_name: String,
    pub year: u16,
}

/// Which bracket a game was played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    Regular,
    PlayoffWinners,
    PlayoffLosers,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Regular => "REGULAR",
            GameType::PlayoffWinners => "PLAYOFF_WINNERS",
            GameType::PlayoffLosers => "PLAYOFF_LOSERS",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR" => Ok(GameType::Regular),
            "PLAYOFF_WINNERS" => Ok(GameType::PlayoffWinners),
            "PLAYOFF_LOSERS" => Ok(GameType::PlayoffLosers),
            other => Err(HistoryError::malformed(format!("unknown game type {other}"))),
        }
    }
}

/// A head-to-head matchup between two franchises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub season_id: i64,
    pub week: u16,
    pub game_type: GameType,
    pub franchise1_id: i64,
    pub franchise2_id: i64,
    pub franchise1_score: Option<f64>,
    pub franchise2_score: Option<f64>,
    pub game_date: Option<String>,
}

/// An NFL player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub nfl_team: Option<String>,
}

/// A player's slot on a franchise's lineup for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub id: i64,
    pub game_id: i64,
    pub franchise_id: i64,
    pub player_id: i64,
    pub score: Option<f64>,
    /// Lineup slot, e.g. `QB` or `BENCH`
    pub position: Option<String>,
}

/// Row counts for the import tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub leagues: u64,
    pub seasons: u64,
    pub managers: u64,
    pub franchises: u64,
    pub franchise_seasons: u64,
}
