//! History command: show what ESPN returns without touching the database

use crate::{
    cli::types::{ids::LeagueId, time::ScoringPeriod},
    config::Settings,
    espn::{parse_history, HistoryEntry},
    Result,
};

use super::espn_client;

/// Handle the history command
pub async fn handle_history(
    settings: &Settings,
    league_id: LeagueId,
    scoring_period: Option<ScoringPeriod>,
    as_json: bool,
) -> Result<()> {
    let client = espn_client(settings)?;
    let history = client.get_league_history(league_id, scoring_period).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&history)?); // tarpaulin::skip
        return Ok(());
    }

    if history.is_empty() {
        println!("No league history found for league {}", league_id); // tarpaulin::skip
        return Ok(());
    }

    let mut entries = parse_history(history)?;
    entries.sort_by_key(|entry| entry.season_id);
    for entry in &entries {
        println!("{}", season_line(entry)); // tarpaulin::skip
    }

    Ok(())
}

/// One summary line per season
pub fn season_line(entry: &HistoryEntry) -> String {
    format!(
        "{} {} ({} members, {} teams)",
        entry.season_id,
        entry.settings.name,
        entry.members.len(),
        entry.teams.len()
    )
}
