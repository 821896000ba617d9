//! Import command implementation

use std::fmt::Write as _;

use crate::{
    cli::types::{ids::LeagueId, time::ScoringPeriod},
    config::Settings,
    import::{ImportSummary, LeagueImporter},
    storage::LedgerDatabase,
    Result,
};

use super::espn_client;

/// Handle the import command
pub async fn handle_import_league(
    settings: &Settings,
    league_id: LeagueId,
    scoring_period: Option<ScoringPeriod>,
) -> Result<ImportSummary> {
    let mut db = LedgerDatabase::open(&settings.database_path)?;
    let importer = LeagueImporter::new(espn_client(settings)?);

    let summary = importer
        .import_league_first_season(&mut db, league_id, scoring_period)
        .await?;

    print!("{}", render_summary(&summary)); // tarpaulin::skip
    Ok(summary)
}

/// Human-readable report of an import
pub fn render_summary(summary: &ImportSummary) -> String {
    let mut out = String::new();
    let created = &summary.created;

    // Writing to a String cannot fail
    let _ = writeln!(out, "✅ Successfully imported league: {}", summary.league.name);
    let _ = writeln!(out, "   Season: {}", summary.season.year);
    let _ = writeln!(out, "   Franchises: {}", summary.franchises.len());
    let _ = writeln!(out, "   Managers: {}", summary.managers.len());
    let _ = writeln!(
        out,
        "   Franchise Seasons: {}",
        summary.franchise_seasons.len()
    );
    let _ = writeln!(
        out,
        "   New rows: {} league, {} season, {} managers, {} franchises, {} franchise seasons",
        created.leagues, created.seasons, created.managers, created.franchises, created.franchise_seasons
    );

    let _ = writeln!(out, "\nFranchises:");
    for franchise in &summary.franchises {
        let _ = writeln!(out, "  - {} (ID: {})", franchise.name, franchise.id);
    }

    let _ = writeln!(out, "\nManagers:");
    for manager in &summary.managers {
        let _ = writeln!(out, "  - {} (ID: {})", manager.name, manager.id);
    }

    let _ = writeln!(out, "\nFranchise Seasons:");
    for fs in &summary.franchise_seasons {
        let _ = writeln!(
            out,
            "  - {} -> {}",
            summary.franchise_name(fs.franchise_id).unwrap_or("?"),
            summary.manager_name(fs.manager_id).unwrap_or("?"),
        );
    }

    out
}
