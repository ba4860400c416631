use crate::core::points::Scorecard;
use crate::core::research::PLAYERS_URL;
use crate::core::roster::Positions;
use crate::core::scoring::ScoringSchema;
use crate::domain::model::Provider;
use crate::utils::error::{FantasyError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// League file: teams, roster slots, scoring overrides and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueConfig {
    pub league: LeagueSection,
    /// Slot count per roster position code.
    pub roster: BTreeMap<String, usize>,
    #[serde(default)]
    pub scoring: ScoringSection,
    #[serde(default)]
    pub research: ResearchSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSection {
    pub name: String,
    pub provider: Provider,
    pub teams: Vec<String>,
    pub rounds: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringSection {
    pub offense: Option<PathBuf>,
    pub kickers: Option<PathBuf>,
    pub defensest: Option<PathBuf>,
    pub schema: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchSection {
    #[serde(default = "default_research_url")]
    pub url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ResearchSection {
    fn default() -> Self {
        Self {
            url: default_research_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_research_url() -> String {
    PLAYERS_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl LeagueConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let mut config = Self::from_toml_str(&content)?;

        // Relative scoring paths are resolved against the league file.
        if let Some(base) = path.as_ref().parent() {
            config.scoring.resolve_relative_to(base);
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are kept.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FantasyError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("league.name", &self.league.name)?;
        validation::validate_teams(&self.league.teams)?;

        let slots = validation::validate_roster_counts(&self.roster)?;
        self.positions()?;
        if let Some(rounds) = self.league.rounds {
            validation::validate_rounds(rounds, slots)?;
        }

        validation::validate_url("research.url", &self.research.url)?;
        validation::validate_positive_number(
            "research.timeout_seconds",
            self.research.timeout_seconds as usize,
            1,
        )?;
        validation::validate_path("output.path", &self.output.path)?;

        Ok(())
    }

    pub fn positions(&self) -> Result<Positions> {
        Positions::new(
            self.league.provider,
            self.roster.iter().map(|(k, v)| (k.clone(), *v)),
        )
    }

    /// Rounds in the draft; defaults to one per roster slot.
    pub fn rounds(&self) -> Result<usize> {
        match self.league.rounds {
            Some(rounds) => Ok(rounds),
            None => Ok(self.positions()?.len()),
        }
    }

    pub fn scorecard(&self) -> Result<Scorecard> {
        Scorecard::with_overrides(
            self.scoring.offense.as_deref(),
            self.scoring.kickers.as_deref(),
            self.scoring.defensest.as_deref(),
        )
    }

    pub fn scoring_schema(&self) -> Result<ScoringSchema> {
        match &self.scoring.schema {
            Some(path) => ScoringSchema::from_file(path),
            None => ScoringSchema::bundled(self.league.provider),
        }
    }
}

impl ScoringSection {
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.offense,
            &mut self.kickers,
            &mut self.defensest,
            &mut self.schema,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

impl Validate for LeagueConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
