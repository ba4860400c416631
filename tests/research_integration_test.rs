use httpmock::prelude::*;
use nfl_fantasy::core::research::{HomeAway, PositionFilter, StatType};
use nfl_fantasy::core::Storage;
use nfl_fantasy::utils::error::ErrorCategory;
use nfl_fantasy::{FantasyError, HttpFetcher, LocalStorage, PlayersQuery};
use tempfile::TempDir;

const PAGE_ONE: &str = r#"
<html><body><div id="primaryContent">
<table class="tableType-player hasGroups">
  <thead>
    <tr class="first"><th colspan="2"></th><th colspan="2">Rushing</th><th>Fantasy</th></tr>
    <tr class="last"><th>Player</th><th>Opp</th><th>Yds</th><th>TD</th><th>Points</th></tr>
  </thead>
  <tbody>
    <tr class="player-1"><td><a class="playerName">Derrick Henry</a> RB - BAL</td><td>@CLE</td><td>132</td><td>2</td><td>25.2</td></tr>
    <tr class="player-2"><td><a class="playerName">Saquon Barkley</a> RB - PHI</td><td>NYG</td><td>176</td><td>1</td><td>23.6</td></tr>
  </tbody>
</table>
</div></body></html>"#;

const EMPTY_PAGE: &str =
    r#"<html><body><div id="primaryContent"><p>No players found.</p></div></body></html>"#;

#[tokio::test]
async fn test_weekly_research_over_http() {
    let server = MockServer::start();

    let first = server.mock(|when, then| {
        when.method(GET)
            .path("/research/players")
            .query_param("offset", "1")
            .query_param("position", "2")
            .query_param("statType", "weekStats")
            .query_param("statWeek", "7")
            .query_param("statSeason", "2024");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(PAGE_ONE);
    });
    let second = server.mock(|when, then| {
        when.method(GET)
            .path("/research/players")
            .query_param("offset", "26");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(EMPTY_PAGE);
    });

    let mut query = PlayersQuery::new().with_url(server.url("/research/players"));
    query.set_position(PositionFilter::RunningBack);
    query.set_stat_season(2024);
    query.set_stat_type(StatType::WeekStats);
    query.set_stat_week(Some(7)).unwrap();

    let fetcher = HttpFetcher::new(5).unwrap();
    let table = query.fetch(&fetcher).await.unwrap();

    first.assert();
    second.assert();

    assert_eq!(table.stat_columns, vec!["Rushing Yds", "Rushing TD", "Fantasy Points"]);
    assert_eq!(table.lines.len(), 2);

    let henry = &table.lines[0];
    assert_eq!(henry.name, "Derrick Henry");
    assert_eq!(henry.team.as_deref(), Some("BAL"));
    assert_eq!(henry.home_away, Some(HomeAway::Away));
    assert_eq!(table.stat(henry, "Fantasy Points"), Some(25.2));

    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    storage
        .write_file("players.csv", table.to_csv().unwrap().as_bytes())
        .await
        .unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("players.csv")).unwrap();
    assert!(written.starts_with("Name,Position,Team,Home/Away,Opponent,Rushing Yds"));
    assert!(written.contains("Saquon Barkley,RB,PHI,H,NYG,176,1,23.6"));
}

#[tokio::test]
async fn test_research_server_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/research/players");
        then.status(500);
    });

    let query = PlayersQuery::new().with_url(server.url("/research/players"));
    let fetcher = HttpFetcher::new(5).unwrap();
    let err = query.fetch(&fetcher).await.unwrap_err();

    mock.assert();
    assert!(matches!(err, FantasyError::HttpError(_)));
    assert_eq!(err.category(), ErrorCategory::Network);
}

#[tokio::test]
async fn test_research_page_without_table() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/research/players");
        then.status(200).body(EMPTY_PAGE);
    });

    let query = PlayersQuery::new().with_url(server.url("/research/players"));
    let fetcher = HttpFetcher::new(5).unwrap();
    let result = query.fetch(&fetcher).await;

    mock.assert();
    assert!(matches!(result, Err(FantasyError::ResearchError { .. })));
}

#[tokio::test]
async fn test_week_stats_without_week_rejected_before_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/research/players");
        then.status(200).body(PAGE_ONE);
    });

    let mut query = PlayersQuery::new().with_url(server.url("/research/players"));
    query.set_stat_type(StatType::WeekStats);

    let fetcher = HttpFetcher::new(5).unwrap();
    let result = query.fetch(&fetcher).await;

    assert!(matches!(result, Err(FantasyError::MissingConfigError { .. })));
    mock.assert_hits(0);
}
