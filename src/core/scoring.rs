//! Provider scoring schemas.
//!
//! A schema file is a three-level JSON object, `section -> category -> stat -> value`,
//! where sections are unit groups such as `OFF` or `D/ST`.

use crate::domain::model::Provider;
use crate::utils::error::{FantasyError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringEntry {
    pub section: String,
    pub category: String,
    pub stat: String,
    pub value: Value,
}

impl ScoringEntry {
    pub fn points(&self) -> Option<f64> {
        self.value.as_f64()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoringSchema {
    path: Option<PathBuf>,
    entries: Vec<ScoringEntry>,
}

impl ScoringSchema {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut schema = Self::from_json_str(&content)?;
        schema.path = Some(path.as_ref().to_path_buf());
        tracing::debug!(
            "Loaded {} scoring entries from {}",
            schema.entries.len(),
            path.as_ref().display()
        );
        Ok(schema)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_str(content)?;

        let mut entries = Vec::new();
        for (section, categories) in &root {
            for (category, stats) in nested_object(&[section], categories)? {
                for (stat, value) in nested_object(&[section, category], stats)? {
                    entries.push(ScoringEntry {
                        section: section.clone(),
                        category: category.clone(),
                        stat: stat.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(Self {
            path: None,
            entries,
        })
    }

    /// Default schema bundled for a provider.
    pub fn bundled(provider: Provider) -> Result<Self> {
        let content = match provider {
            Provider::Espn => include_str!("../../data/espn/scoring.json"),
            Provider::Yahoo => include_str!("../../data/yahoo/scoring.json"),
        };
        Self::from_json_str(content)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flattened entries, in file order.
    pub fn series(&self) -> &[ScoringEntry] {
        &self.entries
    }

    pub fn sections(&self) -> Vec<&str> {
        let mut sections: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !sections.contains(&entry.section.as_str()) {
                sections.push(&entry.section);
            }
        }
        sections
    }

    pub fn section(&self, name: &str) -> Result<Vec<&ScoringEntry>> {
        let entries: Vec<&ScoringEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.section == name)
            .collect();

        if entries.is_empty() {
            return Err(FantasyError::UnknownStat {
                key: name.to_string(),
            });
        }
        Ok(entries)
    }

    pub fn get(&self, section: &str, category: &str, stat: &str) -> Result<&Value> {
        self.entries
            .iter()
            .find(|e| e.section == section && e.category == category && e.stat == stat)
            .map(|e| &e.value)
            .ok_or_else(|| FantasyError::UnknownStat {
                key: format!("{}.{}.{}", section, category, stat),
            })
    }
}

fn nested_object<'a>(path: &[&String], value: &'a Value) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| FantasyError::InvalidConfigValueError {
            field: path
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join("."),
            value: value.to_string(),
            reason: "expected a JSON object".to_string(),
        })
}

/// ESPN schema: offense, kicking, punting, individual defensive players,
/// defense/special teams and head coach.
#[derive(Debug, Clone)]
pub struct EspnScoring {
    schema: ScoringSchema,
}

impl EspnScoring {
    pub fn new(schema: ScoringSchema) -> Self {
        Self { schema }
    }

    pub fn bundled() -> Result<Self> {
        Ok(Self::new(ScoringSchema::bundled(Provider::Espn)?))
    }

    pub fn schema(&self) -> &ScoringSchema {
        &self.schema
    }

    pub fn offense(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("OFF")
    }

    pub fn kicking(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("K")
    }

    pub fn punting(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("P")
    }

    pub fn defense_idp(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("IDP")
    }

    pub fn defensest(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("D/ST")
    }

    pub fn head_coach(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("HC")
    }
}

/// Yahoo! Sports schema: offense, team defense and kicking.
#[derive(Debug, Clone)]
pub struct YahooScoring {
    schema: ScoringSchema,
}

impl YahooScoring {
    pub fn new(schema: ScoringSchema) -> Self {
        Self { schema }
    }

    pub fn bundled() -> Result<Self> {
        Ok(Self::new(ScoringSchema::bundled(Provider::Yahoo)?))
    }

    pub fn schema(&self) -> &ScoringSchema {
        &self.schema
    }

    pub fn offense(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("OFF")
    }

    pub fn defense(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("DEF")
    }

    pub fn kicking(&self) -> Result<Vec<&ScoringEntry>> {
        self.schema.section("K")
    }
}
