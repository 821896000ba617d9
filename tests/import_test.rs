//! End-to-end import tests: mocked ESPN API -> importer -> SQLite

use ffl_history::{
    config::EspnCredentials,
    espn::EspnClient,
    import::{import_history_values, LeagueImporter},
    storage::{LedgerDatabase, TableCounts},
    HistoryError, LeagueId, ScoringPeriod,
};
use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const LEAGUE: LeagueId = LeagueId(777493);

fn acme_2024() -> Value {
    json!({
        "seasonId": 2024,
        "settings": { "name": "Acme League" },
        "members": [ { "id": "m1", "displayName": "Alice" } ],
        "teams": [ { "abbrev": "ACE", "owners": ["m1"] } ]
    })
}

fn importer_for(server: &MockServer) -> LeagueImporter {
    let client = EspnClient::with_base_url(server.uri(), &EspnCredentials::default()).unwrap();
    LeagueImporter::new(client)
}

async fn mount_history(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/games/ffl/leagueHistory/777493"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_season_scenario() {
    let server = MockServer::start().await;
    mount_history(&server, json!([acme_2024()])).await;
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let summary = importer_for(&server)
        .import_league_first_season(&mut db, LEAGUE, None)
        .await
        .unwrap();

    assert_eq!(summary.league.name, "Acme League");
    assert_eq!(summary.season.year, 2024);
    assert_eq!(summary.season.league_id, summary.league.id);
    assert_eq!(summary.managers.len(), 1);
    assert_eq!(summary.managers[0].name, "Alice");
    assert_eq!(summary.franchises.len(), 1);
    assert_eq!(summary.franchises[0].name, "ACE");
    assert_eq!(summary.franchise_seasons.len(), 1);

    let fs = &summary.franchise_seasons[0];
    assert_eq!(fs.franchise_id, summary.franchises[0].id);
    assert_eq!(fs.season_id, summary.season.id);
    assert_eq!(fs.manager_id, summary.managers[0].id);

    assert_eq!(
        db.table_counts().unwrap(),
        TableCounts {
            leagues: 1,
            seasons: 1,
            managers: 1,
            franchises: 1,
            franchise_seasons: 1,
        }
    );
}

#[tokio::test]
async fn test_earliest_season_selected_regardless_of_order() {
    let server = MockServer::start().await;
    let mut season_2023 = acme_2024();
    season_2023["seasonId"] = json!(2023);
    mount_history(&server, json!([acme_2024(), season_2023])).await;
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let summary = importer_for(&server)
        .import_league_first_season(&mut db, LEAGUE, None)
        .await
        .unwrap();

    assert_eq!(summary.season.year, 2023);
    let years: Vec<u16> = db
        .list_seasons(summary.league.id)
        .unwrap()
        .iter()
        .map(|s| s.year)
        .collect();
    assert_eq!(years, vec![2023]);
}

#[tokio::test]
async fn test_single_object_response_is_imported() {
    let server = MockServer::start().await;
    mount_history(&server, acme_2024()).await;
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let summary = importer_for(&server)
        .import_league_first_season(&mut db, LEAGUE, None)
        .await
        .unwrap();

    assert_eq!(summary.season.year, 2024);
}

#[tokio::test]
async fn test_scoring_period_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/games/ffl/leagueHistory/777493"))
        .and(query_param("scoringPeriodId", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([acme_2024()])))
        .expect(1)
        .mount(&server)
        .await;
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    importer_for(&server)
        .import_league_first_season(&mut db, LEAGUE, Some(ScoringPeriod::new(2)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_history_is_error() {
    let server = MockServer::start().await;
    mount_history(&server, json!([])).await;
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let result = importer_for(&server)
        .import_league_first_season(&mut db, LEAGUE, None)
        .await;

    assert!(matches!(
        result,
        Err(HistoryError::EmptyHistory { league_id: 777493 })
    ));
}

#[tokio::test]
async fn test_transport_error_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut db = LedgerDatabase::new_in_memory().unwrap();

    let result = importer_for(&server)
        .import_league_first_season(&mut db, LEAGUE, None)
        .await;

    assert!(matches!(result, Err(HistoryError::Http(_))));
    assert_eq!(db.table_counts().unwrap(), TableCounts::default());
}

#[test]
fn test_reimport_produces_no_duplicates() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();
    let payload = || {
        vec![json!({
            "seasonId": 2022,
            "settings": { "name": "Acme League" },
            "members": [
                { "id": "m1", "displayName": "Alice" },
                { "id": "m2", "displayName": "Bob" },
                { "id": "m3", "displayName": "Cara" }
            ],
            "teams": [
                { "abbrev": "ACE", "owners": ["m1"] },
                { "abbrev": "BOB", "owners": ["m2"] },
                { "abbrev": "CAR", "owners": ["m3"] },
                { "abbrev": "NOO", "owners": [] }
            ]
        })]
    };

    import_history_values(&mut db, LEAGUE, payload()).unwrap();
    let after_first = db.table_counts().unwrap();
    import_history_values(&mut db, LEAGUE, payload()).unwrap();
    let after_second = db.table_counts().unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(after_first.franchises, 4);
    assert_eq!(after_first.franchise_seasons, 3);
}

#[test]
fn test_manager_name_reused_across_runs() {
    let mut db = LedgerDatabase::new_in_memory().unwrap();
    let first = import_history_values(&mut db, LEAGUE, vec![acme_2024()]).unwrap();

    // Another league whose member has the same display name but a different ESPN id
    let other = json!({
        "seasonId": 2024,
        "settings": { "name": "Other League" },
        "members": [ { "id": "zz9", "displayName": "Alice" } ],
        "teams": [ { "abbrev": "OTH", "owners": ["zz9"] } ]
    });
    let second = import_history_values(&mut db, LeagueId::new(1), vec![other]).unwrap();

    assert_eq!(second.managers[0].id, first.managers[0].id);
    assert_eq!(db.table_counts().unwrap().managers, 1);
    assert_eq!(db.table_counts().unwrap().leagues, 2);
}
