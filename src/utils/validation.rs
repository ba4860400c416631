use crate::utils::error::{FantasyError, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path};
use url::Url;

/// Last week of an NFL season, playoffs included.
pub const MAX_WEEK: u32 = 22;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: impl ToString, reason: impl Into<String>) -> FantasyError {
    FantasyError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url =
        Url::parse(url_str).map_err(|e| invalid(field_name, url_str, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }
    Ok(())
}

/// A file name written under the output directory; it may not climb out of it.
pub fn validate_output_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    let escapes = Path::new(name)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(invalid(
            field_name,
            name,
            "output must stay inside the output directory",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty"));
    }
    Ok(())
}

pub fn validate_week(field_name: &str, week: u32) -> Result<()> {
    if !(1..=MAX_WEEK).contains(&week) {
        return Err(invalid(
            field_name,
            week,
            format!("Week must be between 1 and {}", MAX_WEEK),
        ));
    }
    Ok(())
}

/// Team names label the draft board, so they must be present and distinct.
pub fn validate_teams(teams: &[String]) -> Result<()> {
    validate_positive_number("league.teams", teams.len(), 1)?;

    let mut seen = HashSet::new();
    for team in teams {
        validate_non_empty_string("league.teams", team)?;
        if !seen.insert(team.trim()) {
            return Err(invalid("league.teams", team, "Team names must be unique"));
        }
    }
    Ok(())
}

/// The roster needs at least one slot; returns the total slot count.
pub fn validate_roster_counts(roster: &BTreeMap<String, usize>) -> Result<usize> {
    let total: usize = roster.values().sum();
    if total == 0 {
        return Err(invalid("roster", total, "Roster must have at least one slot"));
    }
    Ok(total)
}

/// Every drafted player needs a slot, so rounds cannot exceed the roster size.
pub fn validate_rounds(rounds: usize, roster_slots: usize) -> Result<()> {
    validate_positive_number("league.rounds", rounds, 1)?;
    if rounds > roster_slots {
        return Err(invalid(
            "league.rounds",
            rounds,
            format!("A roster only holds {} players", roster_slots),
        ));
    }
    Ok(())
}
