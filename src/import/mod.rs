//! League history import.
//!
//! Turns one league-history payload into League, Season, Manager, Franchise
//! and FranchiseSeason rows. Every row is looked up by its natural key first
//! and only inserted when missing, so importing the same payload twice leaves
//! the database unchanged. Everything runs on a single transaction that is
//! committed at the very end; an error anywhere before that drops the
//! transaction and rolls it back.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    cli::types::{ids::LeagueId, time::ScoringPeriod},
    error::HistoryError,
    espn::{parse_history, EspnClient, HistoryEntry},
    storage::{queries, Franchise, FranchiseSeason, LedgerDatabase, League, Manager, Season},
    Result,
};

#[cfg(test)]
mod tests;

/// Number of rows each import step inserted (pre-existing rows not counted).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportCounts {
    pub leagues: usize,
    pub seasons: usize,
    pub managers: usize,
    pub franchises: usize,
    pub franchise_seasons: usize,
}

/// Rows resolved by an import, whether found or created.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub league: League,
    pub season: Season,
    pub franchises: Vec<Franchise>,
    /// One entry per distinct member id, in payload order
    pub managers: Vec<Manager>,
    pub franchise_seasons: Vec<FranchiseSeason>,
    pub created: ImportCounts,
}

impl ImportSummary {
    pub fn manager_name(&self, manager_id: i64) -> Option<&str> {
        self.managers
            .iter()
            .find(|m| m.id == manager_id)
            .map(|m| m.name.as_str())
    }

    pub fn franchise_name(&self, franchise_id: i64) -> Option<&str> {
        self.franchises
            .iter()
            .find(|f| f.id == franchise_id)
            .map(|f| f.name.as_str())
    }
}

/// Fetches league history from ESPN and imports its earliest season.
#[derive(Debug, Clone)]
pub struct LeagueImporter {
    client: EspnClient,
}

impl LeagueImporter {
    pub fn new(client: EspnClient) -> Self {
        Self { client }
    }

    pub async fn import_league_first_season(
        &self,
        db: &mut LedgerDatabase,
        league_id: LeagueId,
        scoring_period: Option<ScoringPeriod>,
    ) -> Result<ImportSummary> {
        let history = self
            .client
            .get_league_history(league_id, scoring_period)
            .await?;
        info!(%league_id, seasons = history.len(), "fetched league history");

        import_history_values(db, league_id, history)
    }
}

/// Validate and decode raw season documents, then import the earliest one.
pub fn import_history_values(
    db: &mut LedgerDatabase,
    league_id: LeagueId,
    history: Vec<Value>,
) -> Result<ImportSummary> {
    if history.is_empty() {
        return Err(HistoryError::EmptyHistory {
            league_id: league_id.as_u32(),
        });
    }
    let entries = parse_history(history)?;
    import_first_season(db, league_id, &entries)
}

/// The record with the smallest season id.
///
/// Fails if the list is empty or if two records share the smallest id.
pub fn select_first_season(league_id: LeagueId, history: &[HistoryEntry]) -> Result<&HistoryEntry> {
    let first = history
        .iter()
        .min_by_key(|entry| entry.season_id)
        .ok_or(HistoryError::EmptyHistory {
            league_id: league_id.as_u32(),
        })?;

    let ties = history
        .iter()
        .filter(|entry| entry.season_id == first.season_id)
        .count();
    if ties > 1 {
        return Err(HistoryError::AmbiguousSeason {
            season_id: first.season_id.as_u16(),
        });
    }

    Ok(first)
}

/// Import the earliest season of `history` in one transaction.
pub fn import_first_season(
    db: &mut LedgerDatabase,
    league_id: LeagueId,
    history: &[HistoryEntry],
) -> Result<ImportSummary> {
    let entry = select_first_season(league_id, history)?;
    let mut created = ImportCounts::default();

    let tx = db.transaction()?;

    let league_name = entry.settings.name.as_str();
    let league = find_or_create(
        || queries::find_league_by_name(&tx, league_name),
        || queries::insert_league(&tx, league_name, Some(&entry.settings.to_value())),
        &mut created.leagues,
    )?;
    debug!(league_id = league.id, name = %league.name, "resolved league");

    let year = entry.season_id.as_u16();
    let season = find_or_create(
        || queries::find_season(&tx, league.id, year),
        || queries::insert_season(&tx, league.id, year),
        &mut created.seasons,
    )?;
    debug!(season_id = season.id, year, "resolved season");

    // Members sharing a display name resolve to the same manager row.
    let mut managers_by_member: HashMap<&str, Manager> = HashMap::new();
    let mut member_order: Vec<&str> = Vec::new();
    for member in &entry.members {
        let name = member.display_name.as_str();
        let manager = find_or_create(
            || queries::find_manager_by_name(&tx, name),
            || queries::insert_manager(&tx, name),
            &mut created.managers,
        )?;
        if managers_by_member
            .insert(member.id.as_str(), manager)
            .is_none()
        {
            member_order.push(member.id.as_str());
        }
    }

    let mut franchises = Vec::with_capacity(entry.teams.len());
    let mut franchise_seasons = Vec::new();
    for team in &entry.teams {
        let abbrev = team.abbrev.as_str();
        let franchise = find_or_create(
            || queries::find_franchise(&tx, league.id, abbrev),
            || queries::insert_franchise(&tx, league.id, abbrev),
            &mut created.franchises,
        )?;

        let manager = team
            .primary_owner()
            .and_then(|owner| managers_by_member.get(owner));

        match manager {
            Some(manager) => {
                let franchise_season = find_or_create(
                    || queries::find_franchise_season(&tx, franchise.id, season.id),
                    || queries::insert_franchise_season(&tx, franchise.id, season.id, manager.id),
                    &mut created.franchise_seasons,
                )?;
                franchise_seasons.push(franchise_season);
            }
            None => {
                debug!(abbrev, owners = ?team.owners, "no known owner, skipping franchise season");
            }
        }

        franchises.push(franchise);
    }

    tx.commit()?;

    let managers: Vec<Manager> = member_order
        .iter()
        .filter_map(|id| managers_by_member.get(id).cloned())
        .collect();

    info!(
        league = %league.name,
        year,
        franchises = franchises.len(),
        managers = managers.len(),
        franchise_seasons = franchise_seasons.len(),
        created = ?created,
        "import committed"
    );

    Ok(ImportSummary {
        league,
        season,
        franchises,
        managers,
        franchise_seasons,
        created,
    })
}

fn find_or_create<T>(
    find: impl FnOnce() -> Result<Option<T>>,
    create: impl FnOnce() -> Result<T>,
    created: &mut usize,
) -> Result<T> {
    if let Some(existing) = find()? {
        return Ok(existing);
    }
    let row = create()?;
    *created += 1;
    Ok(row)
}
