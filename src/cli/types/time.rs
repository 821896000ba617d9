//! Time-related types for ESPN Fantasy Football seasons and scoring periods.

use crate::error::{HistoryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Season years (ESPN's `seasonId`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

/// Type-safe wrapper for ESPN scoring period ids (one per NFL week)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringPeriod(pub u16);

impl ScoringPeriod {
    pub fn new(period: u16) -> Self {
        Self(period)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for ScoringPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScoringPeriod {
    type Err = HistoryError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_ordering() {
        let mut seasons = vec![Season::new(2024), Season::new(2019), Season::new(2021)];
        seasons.sort();
        assert_eq!(
            seasons,
            vec![Season::new(2019), Season::new(2021), Season::new(2024)]
        );
    }

    #[test]
    fn test_season_from_str() {
        assert_eq!("2023".parse::<Season>().unwrap(), Season::new(2023));
        assert!("20x3".parse::<Season>().is_err());
    }

    #[test]
    fn test_scoring_period_display() {
        assert_eq!(ScoringPeriod::new(7).to_string(), "7");
        assert_eq!("14".parse::<ScoringPeriod>().unwrap().as_u16(), 14);
    }
}
