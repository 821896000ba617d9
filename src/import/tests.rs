//! Unit tests for the league history importer

use super::*;
use crate::cli::types::time::Season as SeasonId;
use serde_json::json;

const LEAGUE: LeagueId = LeagueId(777493);

fn acme_season(season_id: u16) -> Value {
    json!({
        "seasonId": season_id,
        "settings": { "name": "Acme League", "size": 2 },
        "members": [
            { "id": "m1", "displayName": "Alice" },
            { "id": "m2", "displayName": "Bob" }
        ],
        "teams": [
            { "abbrev": "ACE", "owners": ["m1"] },
            { "abbrev": "BOB", "owners": ["m2", "m1"] }
        ]
    })
}

fn entries(values: Vec<Value>) -> Vec<HistoryEntry> {
    parse_history(values).unwrap()
}

#[test]
fn test_select_first_season_uses_minimum_id() {
    let history = entries(vec![acme_season(2024), acme_season(2021), acme_season(2023)]);

    let first = select_first_season(LEAGUE, &history).unwrap();

    assert_eq!(first.season_id, SeasonId::new(2021));
}

#[test]
fn test_select_first_season_empty() {
    assert!(matches!(
        select_first_season(LEAGUE, &[]),
        Err(HistoryError::EmptyHistory { league_id: 777493 })
    ));
}

#[test]
fn test_select_first_season_rejects_tied_minimum() {
    let history = entries(vec![acme_season(2022), acme_season(2024), acme_season(2022)]);

    assert!(matches!(
        select_first_season(LEAGUE, &history),
        Err(HistoryError::AmbiguousSeason { season_id: 2022 })
    ));
}

#[test]
fn test_select_first_season_ignores_ties_above_minimum() {
    let history = entries(vec![acme_season(2024), acme_season(2024), acme_season(2020)]);

    let first = select_first_season(LEAGUE, &history).unwrap();
    assert_eq!(first.season_id, SeasonId::new(2020));
}

#[test]
fn test_import_counts_created_rows() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let summary = import_history_values(&mut db, LEAGUE, vec![acme_season(2024)]).unwrap();

    assert_eq!(
        summary.created,
        ImportCounts {
            leagues: 1,
            seasons: 1,
            managers: 2,
            franchises: 2,
            franchise_seasons: 2,
        }
    );
    assert_eq!(summary.franchise_name(summary.franchise_seasons[1].franchise_id), Some("BOB"));
    assert_eq!(summary.manager_name(summary.franchise_seasons[1].manager_id), Some("Bob"));
}

#[test]
fn test_second_import_creates_nothing() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();
    let first = import_history_values(&mut db, LEAGUE, vec![acme_season(2024)]).unwrap();

    let second = import_history_values(&mut db, LEAGUE, vec![acme_season(2024)]).unwrap();

    assert_eq!(second.created, ImportCounts::default());
    assert_eq!(second.league, first.league);
    assert_eq!(second.season, first.season);
    assert_eq!(second.managers, first.managers);
    assert_eq!(second.franchises, first.franchises);
    assert_eq!(second.franchise_seasons, first.franchise_seasons);
}

#[test]
fn test_existing_league_settings_not_updated() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();
    import_history_values(&mut db, LEAGUE, vec![acme_season(2024)]).unwrap();

    let mut changed = acme_season(2023);
    changed["settings"]["size"] = json!(14);
    let summary = import_history_values(&mut db, LEAGUE, vec![changed]).unwrap();

    assert_eq!(summary.created.leagues, 0);
    assert_eq!(summary.created.seasons, 1);
    let settings = summary.league.settings.unwrap();
    assert_eq!(settings["size"], 2);
}

#[test]
fn test_shared_display_name_collapses_to_one_manager() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();
    let payload = json!({
        "seasonId": 2024,
        "settings": { "name": "Acme League" },
        "members": [
            { "id": "m1", "displayName": "Chris" },
            { "id": "m2", "displayName": "Chris" }
        ],
        "teams": [
            { "abbrev": "ONE", "owners": ["m1"] },
            { "abbrev": "TWO", "owners": ["m2"] }
        ]
    });

    let summary = import_history_values(&mut db, LEAGUE, vec![payload]).unwrap();

    assert_eq!(summary.created.managers, 1);
    assert_eq!(summary.managers.len(), 2);
    assert_eq!(summary.managers[0].id, summary.managers[1].id);
    assert_eq!(
        summary.franchise_seasons[0].manager_id,
        summary.franchise_seasons[1].manager_id
    );
}

#[test]
fn test_team_without_known_owner_gets_no_franchise_season() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();
    let payload = json!({
        "seasonId": 2024,
        "settings": { "name": "Acme League" },
        "members": [ { "id": "m1", "displayName": "Alice" } ],
        "teams": [
            { "abbrev": "ACE", "owners": ["m1"] },
            { "abbrev": "NOO", "owners": [] },
            { "abbrev": "GHO", "owners": ["departed-member"] }
        ]
    });

    let summary = import_history_values(&mut db, LEAGUE, vec![payload]).unwrap();

    assert_eq!(summary.franchises.len(), 3);
    assert_eq!(summary.franchise_seasons.len(), 1);
    assert_eq!(summary.franchise_seasons[0].franchise_id, summary.franchises[0].id);
}

#[test]
fn test_empty_values_rejected_before_decoding() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let result = import_history_values(&mut db, LEAGUE, Vec::new());

    assert!(matches!(
        result,
        Err(HistoryError::EmptyHistory { league_id: 777493 })
    ));
}

#[test]
fn test_malformed_payload_writes_nothing() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let result = import_history_values(
        &mut db,
        LEAGUE,
        vec![json!({ "seasonId": 2024, "settings": {} })],
    );

    assert!(matches!(result, Err(HistoryError::MalformedPayload { .. })));
    assert_eq!(db.table_counts().unwrap(), Default::default());
}

#[test]
fn test_failure_mid_import_rolls_back() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();
    // Make the franchise_season insert fail after league/season/managers are written.
    db.connection()
        .execute_batch(
            "CREATE TRIGGER refuse_franchise_season BEFORE INSERT ON franchise_season
             BEGIN SELECT RAISE(ABORT, 'refused'); END;",
        )
        .unwrap();

    let result = import_history_values(&mut db, LEAGUE, vec![acme_season(2024)]);

    assert!(result.is_err());
    assert_eq!(db.table_counts().unwrap(), Default::default());
}
