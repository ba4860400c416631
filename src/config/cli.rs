use crate::core::points::SchemeKind;
use crate::core::research::{PositionFilter, StatType};
use crate::domain::model::Provider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "nfl-fantasy")]
#[command(about = "Fantasy football scoring, rosters, snake drafts and NFL.com research")]
#[command(version)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemeArg {
    Offense,
    Kickers,
    Defensest,
}

impl From<SchemeArg> for SchemeKind {
    fn from(value: SchemeArg) -> Self {
        match value {
            SchemeArg::Offense => SchemeKind::Offense,
            SchemeArg::Kickers => SchemeKind::Kickers,
            SchemeArg::Defensest => SchemeKind::DefenseST,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show a provider scoring schema
    Scoring {
        #[arg(long, value_enum, default_value = "espn")]
        provider: Provider,

        /// Schema file to load instead of the bundled default
        #[arg(long)]
        file: Option<PathBuf>,

        /// Only show one section, e.g. OFF or D/ST
        #[arg(long)]
        section: Option<String>,
    },

    /// Show point schemes, or score a stat line against one
    Points {
        #[arg(long)]
        offense: Option<PathBuf>,

        #[arg(long)]
        kickers: Option<PathBuf>,

        #[arg(long)]
        defensest: Option<PathBuf>,

        /// Scheme used for --stat
        #[arg(long, value_enum, default_value = "offense")]
        scheme: SchemeArg,

        /// Stat line entry as category.stat=value (repeatable)
        #[arg(long = "stat", value_parser = parse_stat)]
        stats: Vec<(String, String, f64)>,
    },

    /// Build a roster from a league file and a players CSV
    Roster {
        #[arg(short, long, default_value = "league.toml")]
        config: PathBuf,

        /// CSV with name,position[,injured_reserve] columns
        #[arg(long)]
        players: PathBuf,
    },

    /// Run a best-available snake draft from a ranked players CSV
    Draft {
        #[arg(short, long, default_value = "league.toml")]
        config: PathBuf,

        /// Ranked CSV with name,position[,injured_reserve] columns
        #[arg(long)]
        players: PathBuf,

        /// Results file name, written under the league output path
        #[arg(long, default_value = "draft.csv")]
        output: String,
    },

    /// Download player stats from the NFL.com research listing
    Research {
        /// League file supplying the research URL, timeout and output path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// O (offense), 1 (QB), 2 (RB), 3 (WR), 4 (TE), 7 (K) or 8 (DEF)
        #[arg(long, default_value = "O")]
        position: PositionFilter,

        #[arg(long)]
        season: Option<i32>,

        /// Week number; switches to weekly stats
        #[arg(long)]
        week: Option<u32>,

        #[arg(long, default_value = "players.csv")]
        output: String,
    },
}

fn parse_stat(s: &str) -> std::result::Result<(String, String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected category.stat=value, got '{}'", s))?;
    let (category, stat) = key
        .split_once('.')
        .ok_or_else(|| format!("expected category.stat, got '{}'", key))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value '{}': {}", value, e))?;

    Ok((category.trim().to_string(), stat.trim().to_string(), value))
}

impl Command {
    pub fn stat_type(&self) -> StatType {
        match self {
            Command::Research { week: Some(_), .. } => StatType::WeekStats,
            _ => StatType::SeasonStats,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Draft { output, .. } => validation::validate_output_name("output", output),
            Command::Research { output, week, .. } => {
                validation::validate_output_name("output", output)?;
                match week {
                    Some(week) => validation::validate_week("week", *week),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }
}
