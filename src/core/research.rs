//! Player research from the NFL.com fantasy "players" listing.
//!
//! The listing is paginated 25 rows at a time. Each row starts with a player
//! cell such as `Josh Allen QB - BUF` and an opponent cell such as `@MIA`,
//! followed by one cell per stat column.

use crate::domain::ports::PageFetcher;
use crate::utils::error::{FantasyError, Result};
use crate::utils::validation::{self, Validate};
use chrono::Datelike;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const PLAYERS_URL: &str = "https://fantasy.nfl.com/research/players";
pub const PAGE_SIZE: usize = 25;
const MAX_PAGES: usize = 200;

fn research_error(message: impl Into<String>) -> FantasyError {
    FantasyError::ResearchError {
        message: message.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionFilter {
    Offense,
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

impl PositionFilter {
    /// Value of the `position` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            PositionFilter::Offense => "O",
            PositionFilter::Quarterback => "1",
            PositionFilter::RunningBack => "2",
            PositionFilter::WideReceiver => "3",
            PositionFilter::TightEnd => "4",
            PositionFilter::Kicker => "7",
            PositionFilter::Defense => "8",
        }
    }
}

impl FromStr for PositionFilter {
    type Err = FantasyError;

    /// Accepts the query codes (`O`, `1`, `2`, `3`, `4`, `7`, `8`) or position names.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "O" | "OFF" | "OFFENSE" => Ok(PositionFilter::Offense),
            "1" | "QB" => Ok(PositionFilter::Quarterback),
            "2" | "RB" => Ok(PositionFilter::RunningBack),
            "3" | "WR" => Ok(PositionFilter::WideReceiver),
            "4" | "TE" => Ok(PositionFilter::TightEnd),
            "7" | "K" => Ok(PositionFilter::Kicker),
            "8" | "DEF" => Ok(PositionFilter::Defense),
            _ => Err(FantasyError::InvalidConfigValueError {
                field: "position".to_string(),
                value: s.to_string(),
                reason: "expected one of O, 1, 2, 3, 4, 7, 8".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatType {
    SeasonStats,
    WeekStats,
}

impl StatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatType::SeasonStats => "seasonStats",
            StatType::WeekStats => "weekStats",
        }
    }
}

impl FromStr for StatType {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "seasonStats" | "season" => Ok(StatType::SeasonStats),
            "weekStats" | "week" => Ok(StatType::WeekStats),
            _ => Err(FantasyError::InvalidConfigValueError {
                field: "stat_type".to_string(),
                value: s.to_string(),
                reason: "expected seasonStats or weekStats".to_string(),
            }),
        }
    }
}

/// Query parameters of the players listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayersQuery {
    url: String,
    league_id: u32,
    position: PositionFilter,
    stat_category: String,
    stat_season: i32,
    stat_type: StatType,
    stat_week: Option<u32>,
}

impl Default for PlayersQuery {
    fn default() -> Self {
        Self {
            url: PLAYERS_URL.to_string(),
            league_id: 0,
            position: PositionFilter::Offense,
            stat_category: "stats".to_string(),
            stat_season: chrono::Local::now().year(),
            stat_type: StatType::SeasonStats,
            stat_week: None,
        }
    }
}

impl PlayersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn league_id(&self) -> u32 {
        self.league_id
    }

    /// Only the public league (`0`) is supported.
    pub fn set_league_id(&mut self, value: u32) -> Result<()> {
        if value != 0 {
            return Err(FantasyError::InvalidConfigValueError {
                field: "league_id".to_string(),
                value: value.to_string(),
                reason: "only league 0 is supported".to_string(),
            });
        }
        self.league_id = value;
        Ok(())
    }

    pub fn position(&self) -> PositionFilter {
        self.position
    }

    pub fn set_position(&mut self, value: PositionFilter) {
        self.position = value;
    }

    pub fn stat_category(&self) -> &str {
        &self.stat_category
    }

    pub fn set_stat_category(&mut self, value: &str) -> Result<()> {
        if value != "stats" {
            return Err(FantasyError::InvalidConfigValueError {
                field: "stat_category".to_string(),
                value: value.to_string(),
                reason: "only 'stats' is supported".to_string(),
            });
        }
        self.stat_category = value.to_string();
        Ok(())
    }

    pub fn stat_season(&self) -> i32 {
        self.stat_season
    }

    pub fn set_stat_season(&mut self, value: i32) {
        self.stat_season = value;
    }

    pub fn stat_type(&self) -> StatType {
        self.stat_type
    }

    /// Switching to season stats clears the week.
    pub fn set_stat_type(&mut self, value: StatType) {
        self.stat_type = value;
        if value == StatType::SeasonStats {
            self.stat_week = None;
        }
    }

    pub fn stat_week(&self) -> Option<u32> {
        self.stat_week
    }

    /// Ignored for season stats; required for week stats.
    pub fn set_stat_week(&mut self, value: Option<u32>) -> Result<()> {
        match self.stat_type {
            StatType::SeasonStats => self.stat_week = None,
            StatType::WeekStats => {
                let week = value.ok_or_else(|| FantasyError::MissingConfigError {
                    field: "stat_week".to_string(),
                })?;
                self.stat_week = Some(week);
            }
        }
        Ok(())
    }

    /// Query string pairs for the page starting at `offset` (1-based).
    pub fn params(&self, offset: usize) -> Vec<(String, String)> {
        let mut params = vec![
            ("offset".to_string(), offset.to_string()),
            ("leagueId".to_string(), self.league_id.to_string()),
            ("position".to_string(), self.position.code().to_string()),
            ("statCategory".to_string(), self.stat_category.clone()),
            ("statSeason".to_string(), self.stat_season.to_string()),
            ("statType".to_string(), self.stat_type.as_str().to_string()),
        ];
        if let Some(week) = self.stat_week {
            params.push(("statWeek".to_string(), week.to_string()));
        }
        params
    }

    /// Fetches every page of the listing and parses the rows.
    pub async fn fetch<F: PageFetcher + ?Sized>(&self, fetcher: &F) -> Result<ResearchTable> {
        self.validate()?;

        let mut headers: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        let mut offset = 1;
        let mut exhausted = false;

        for page in 0..MAX_PAGES {
            let html = fetcher.fetch(&self.url, &self.params(offset)).await?;
            let table = match parse_table(&html)? {
                Some(table) if !table.rows.is_empty() => table,
                _ => {
                    exhausted = true;
                    break;
                }
            };

            tracing::debug!(
                "Page {} (offset {}): {} rows",
                page + 1,
                offset,
                table.rows.len()
            );
            headers.get_or_insert(table.headers);
            rows.extend(table.rows);
            offset += PAGE_SIZE;
        }

        if !exhausted {
            tracing::warn!(
                "Stopped after {} pages with {} rows; the listing may be truncated",
                MAX_PAGES,
                rows.len()
            );
        }

        let headers = headers.ok_or_else(|| {
            research_error(format!("no player table found at {}", self.url))
        })?;
        tracing::info!("Fetched {} player rows from {}", rows.len(), self.url);

        ResearchTable::from_raw(headers, rows)
    }
}

impl Validate for PlayersQuery {
    fn validate(&self) -> Result<()> {
        validation::validate_url("research.url", &self.url)?;
        if self.stat_type == StatType::WeekStats {
            let week = self.stat_week.ok_or_else(|| FantasyError::MissingConfigError {
                field: "stat_week".to_string(),
            })?;
            validation::validate_week("stat_week", week)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HomeAway {
    Home,
    Away,
}

impl fmt::Display for HomeAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeAway::Home => write!(f, "H"),
            HomeAway::Away => write!(f, "A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatLine {
    pub name: String,
    pub position: String,
    pub team: Option<String>,
    /// `None` on a bye week.
    pub home_away: Option<HomeAway>,
    pub opponent: Option<String>,
    /// Stat values in column order; `-` cells are stored as `0`.
    pub stats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResearchTable {
    pub stat_columns: Vec<String>,
    pub lines: Vec<PlayerStatLine>,
}

impl ResearchTable {
    fn from_raw(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let parser = RowParser::new()?;
        let stat_columns = headers.into_iter().skip(2).collect();

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            match parser.parse(row) {
                Some(line) => lines.push(line),
                None => tracing::warn!("Skipping unrecognised player row"),
            }
        }

        Ok(Self {
            stat_columns,
            lines,
        })
    }

    pub fn stat(&self, line: &PlayerStatLine, column: &str) -> Option<f64> {
        let index = self.stat_columns.iter().position(|c| c == column)?;
        line.stats.get(index)?.replace(',', "").parse().ok()
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["Name", "Position", "Team", "Home/Away", "Opponent"];
        header.extend(self.stat_columns.iter().map(String::as_str));
        writer.write_record(&header)?;

        for line in &self.lines {
            let home_away = line.home_away.map(|h| h.to_string()).unwrap_or_default();
            let mut record = vec![
                line.name.as_str(),
                line.position.as_str(),
                line.team.as_deref().unwrap_or(""),
                home_away.as_str(),
                line.opponent.as_deref().unwrap_or(""),
            ];
            record.extend(line.stats.iter().map(String::as_str));
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FantasyError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| research_error(e.to_string()))
    }
}

struct RowParser {
    name_position: Regex,
    team: Regex,
    opponent: Regex,
}

impl RowParser {
    fn new() -> Result<Self> {
        let compile =
            |pattern: &str| Regex::new(pattern).map_err(|e| research_error(e.to_string()));
        Ok(Self {
            name_position: compile(r"^(.*)\s(QB|RB|WR|TE|K|DEF)\b")?,
            team: compile(r"(QB|RB|WR|TE|K|DEF)\s-\s([A-Z]{2,3})")?,
            opponent: compile(r"[A-Z]{2,3}")?,
        })
    }

    fn parse(&self, row: Vec<String>) -> Option<PlayerStatLine> {
        let mut cells = row.into_iter();
        let player = cells.next()?;
        let opponent = cells.next()?;

        let caps = self.name_position.captures(&player)?;
        let team = self.team.captures(&player).map(|c| c[2].to_string());

        let home_away = if opponent == "Bye" {
            None
        } else if opponent.contains('@') {
            Some(HomeAway::Away)
        } else {
            Some(HomeAway::Home)
        };

        Some(PlayerStatLine {
            name: caps[1].trim().to_string(),
            position: caps[2].to_string(),
            team,
            home_away,
            opponent: self.opponent.find(&opponent).map(|m| m.as_str().to_string()),
            stats: cells.collect(),
        })
    }
}

/// Header names and body cells of the first `#primaryContent table`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| research_error(format!("invalid selector '{}': {}", css, e)))
}

fn cell_text(cell: &ElementRef) -> String {
    let text = cell.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Body cells use `-` for "no value".
fn body_cell_text(cell: &ElementRef) -> String {
    match cell_text(cell) {
        text if text == "-" => "0".to_string(),
        text => text,
    }
}

/// Parses the listing table, or `None` when the page carries no table.
pub fn parse_table(html: &str) -> Result<Option<RawTable>> {
    let document = Html::parse_document(html);
    let table_selector = selector("#primaryContent table")?;
    let header_row_selector = selector("thead tr")?;
    let header_selector = selector("th")?;
    let body_row_selector = selector("tbody tr")?;
    let cell_selector = selector("td")?;

    let table = match document.select(&table_selector).next() {
        Some(table) => table,
        None => return Ok(None),
    };

    // Group rows span several columns; the last header row names each column.
    let header_rows: Vec<ElementRef> = table.select(&header_row_selector).collect();
    let mut headers: Vec<String> = Vec::new();
    if let Some((leaf_row, group_rows)) = header_rows.split_last() {
        let leaves: Vec<String> = leaf_row
            .select(&header_selector)
            .map(|th| cell_text(&th))
            .collect();

        let mut groups = vec![String::new(); leaves.len()];
        if let Some(group_row) = group_rows.last() {
            let mut column = 0;
            for th in group_row.select(&header_selector) {
                let span: usize = th
                    .value()
                    .attr("colspan")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1);
                let name = cell_text(&th);
                for slot in groups.iter_mut().skip(column).take(span) {
                    slot.clone_from(&name);
                }
                column += span;
            }
        }

        headers = leaves
            .into_iter()
            .zip(groups)
            .map(|(leaf, group)| {
                if group.is_empty() || group == leaf {
                    leaf
                } else {
                    format!("{} {}", group, leaf)
                }
            })
            .collect();
    }

    let rows: Vec<Vec<String>> = table
        .select(&body_row_selector)
        .map(|tr| {
            tr.select(&cell_selector)
                .map(|td| body_cell_text(&td))
                .collect()
        })
        .filter(|cells: &Vec<String>| !cells.is_empty())
        .collect();

    if headers.is_empty() {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        headers = (0..width).map(|i| format!("Column {}", i + 1)).collect();
    }

    Ok(Some(RawTable { headers, rows }))
}
