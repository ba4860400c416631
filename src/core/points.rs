//! Fantasy point schemes: points awarded per stat, grouped by category.
//!
//! A scheme file is a two-level JSON object, `category -> stat -> points`.
//! Entry order follows the file.

use crate::utils::error::{FantasyError, Result};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeKind {
    Offense,
    Kickers,
    DefenseST,
}

impl SchemeKind {
    pub fn name(&self) -> &'static str {
        match self {
            SchemeKind::Offense => "offense",
            SchemeKind::Kickers => "kickers",
            SchemeKind::DefenseST => "defensest",
        }
    }

    /// Location of the default scheme, relative to the package root.
    pub fn default_path(&self) -> &'static str {
        match self {
            SchemeKind::Offense => "data/points/offense.json",
            SchemeKind::Kickers => "data/points/kickers.json",
            SchemeKind::DefenseST => "data/points/defensest.json",
        }
    }

    fn bundled(&self) -> &'static str {
        match self {
            SchemeKind::Offense => include_str!("../../data/points/offense.json"),
            SchemeKind::Kickers => include_str!("../../data/points/kickers.json"),
            SchemeKind::DefenseST => include_str!("../../data/points/defensest.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointScheme {
    kind: SchemeKind,
    categories: Vec<(String, Vec<(String, f64)>)>,
}

impl PointScheme {
    pub fn from_file<P: AsRef<Path>>(kind: SchemeKind, path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(
            "Loaded {} point scheme from {}",
            kind.name(),
            path.as_ref().display()
        );
        Self::from_json_str(kind, &content)
    }

    pub fn from_json_str(kind: SchemeKind, content: &str) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_str(content)?;

        let mut categories = Vec::with_capacity(root.len());
        for (category, stats) in root {
            let stats = stats
                .as_object()
                .ok_or_else(|| FantasyError::InvalidConfigValueError {
                    field: format!("{}.{}", kind.name(), category),
                    value: stats.to_string(),
                    reason: "category must map stat names to points".to_string(),
                })?;

            let mut entries = Vec::with_capacity(stats.len());
            for (stat, points) in stats {
                let points = points
                    .as_f64()
                    .ok_or_else(|| FantasyError::InvalidConfigValueError {
                        field: format!("{}.{}.{}", kind.name(), category, stat),
                        value: points.to_string(),
                        reason: "points must be a number".to_string(),
                    })?;
                entries.push((stat.clone(), points));
            }
            categories.push((category, entries));
        }

        Ok(Self { kind, categories })
    }

    /// The scheme shipped with the crate.
    pub fn bundled(kind: SchemeKind) -> Result<Self> {
        Self::from_json_str(kind, kind.bundled())
    }

    pub fn kind(&self) -> SchemeKind {
        self.kind
    }

    pub fn category(&self, name: &str) -> Result<&[(String, f64)]> {
        self.categories
            .iter()
            .find(|(category, _)| category == name)
            .map(|(_, stats)| stats.as_slice())
            .ok_or_else(|| FantasyError::UnknownStat {
                key: format!("{}.{}", self.kind.name(), name),
            })
    }

    pub fn get(&self, category: &str, stat: &str) -> Result<f64> {
        self.category(category)?
            .iter()
            .find(|(name, _)| name == stat)
            .map(|(_, points)| *points)
            .ok_or_else(|| FantasyError::UnknownStat {
                key: format!("{}.{}.{}", self.kind.name(), category, stat),
            })
    }

    /// Every `(category, stat)` pair, in file order.
    pub fn keys(&self) -> Vec<(&str, &str)> {
        self.categories
            .iter()
            .flat_map(|(category, stats)| {
                stats
                    .iter()
                    .map(move |(stat, _)| (category.as_str(), stat.as_str()))
            })
            .collect()
    }

    /// Flattened `(category, stat, points)` rows, in file order.
    pub fn series(&self) -> Vec<(&str, &str, f64)> {
        self.categories
            .iter()
            .flat_map(|(category, stats)| {
                stats
                    .iter()
                    .map(move |(stat, points)| (category.as_str(), stat.as_str(), *points))
            })
            .collect()
    }

    /// Fantasy points for a stat line of `(category, stat, value)` entries.
    pub fn score(&self, line: &[(&str, &str, f64)]) -> Result<f64> {
        line.iter().try_fold(0.0, |total, (category, stat, value)| {
            Ok(total + self.get(category, stat)? * value)
        })
    }
}

/// One scheme per scored unit: offensive players, kickers, defense/special teams.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorecard {
    offense: PointScheme,
    kickers: PointScheme,
    defensest: PointScheme,
}

impl Scorecard {
    pub fn new<P: AsRef<Path>>(offense: P, kickers: P, defensest: P) -> Result<Self> {
        Ok(Self {
            offense: PointScheme::from_file(SchemeKind::Offense, offense)?,
            kickers: PointScheme::from_file(SchemeKind::Kickers, kickers)?,
            defensest: PointScheme::from_file(SchemeKind::DefenseST, defensest)?,
        })
    }

    /// Scorecard built from optional overrides, falling back to the bundled schemes.
    pub fn with_overrides(
        offense: Option<&Path>,
        kickers: Option<&Path>,
        defensest: Option<&Path>,
    ) -> Result<Self> {
        let load = |kind: SchemeKind, path: Option<&Path>| match path {
            Some(path) => PointScheme::from_file(kind, path),
            None => PointScheme::bundled(kind),
        };

        Ok(Self {
            offense: load(SchemeKind::Offense, offense)?,
            kickers: load(SchemeKind::Kickers, kickers)?,
            defensest: load(SchemeKind::DefenseST, defensest)?,
        })
    }

    pub fn default_schemes() -> Result<Self> {
        Self::with_overrides(None, None, None)
    }

    pub fn offense(&self) -> &PointScheme {
        &self.offense
    }

    pub fn kickers(&self) -> &PointScheme {
        &self.kickers
    }

    pub fn defensest(&self) -> &PointScheme {
        &self.defensest
    }

    pub fn schemes(&self) -> [&PointScheme; 3] {
        [&self.offense, &self.kickers, &self.defensest]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCHEME: &str = r#"{
        "passing": {"yards": 0.04, "touchdowns": 4},
        "rushing": {"yards": 0.1, "touchdowns": 6}
    }"#;

    #[test]
    fn test_keys_follow_file_order() {
        let scheme = PointScheme::from_json_str(SchemeKind::Offense, SCHEME).unwrap();

        assert_eq!(
            scheme.keys(),
            vec![
                ("passing", "yards"),
                ("passing", "touchdowns"),
                ("rushing", "yards"),
                ("rushing", "touchdowns"),
            ]
        );
        assert_eq!(scheme.get("rushing", "touchdowns").unwrap(), 6.0);
    }

    #[test]
    fn test_unknown_entries_are_errors() {
        let scheme = PointScheme::from_json_str(SchemeKind::Offense, SCHEME).unwrap();

        assert!(matches!(
            scheme.get("kicking", "yards"),
            Err(FantasyError::UnknownStat { .. })
        ));
        assert!(matches!(
            scheme.get("passing", "sacks"),
            Err(FantasyError::UnknownStat { .. })
        ));
    }

    #[test]
    fn test_non_numeric_points_rejected() {
        let result =
            PointScheme::from_json_str(SchemeKind::Kickers, r#"{"fg": {"made": "three"}}"#);
        assert!(matches!(
            result,
            Err(FantasyError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_score_stat_line() {
        let scheme = PointScheme::from_json_str(SchemeKind::Offense, SCHEME).unwrap();

        let points = scheme
            .score(&[("passing", "yards", 300.0), ("passing", "touchdowns", 2.0)])
            .unwrap();
        assert!((points - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_bundled_scorecard_loads() {
        let scorecard = Scorecard::default_schemes().unwrap();

        assert_eq!(scorecard.offense().get("rushing", "touchdowns").unwrap(), 6.0);
        assert_eq!(scorecard.kickers().get("extra_points", "made").unwrap(), 1.0);
        assert_eq!(scorecard.defensest().get("points_allowed", "0").unwrap(), 10.0);
    }

    #[test]
    fn test_scorecard_from_files() {
        let mut offense = NamedTempFile::new().unwrap();
        offense.write_all(SCHEME.as_bytes()).unwrap();
        let mut kickers = NamedTempFile::new().unwrap();
        kickers.write_all(br#"{"fg": {"made": 3}}"#).unwrap();
        let mut defense = NamedTempFile::new().unwrap();
        defense.write_all(br#"{"defense": {"sacks": 1}}"#).unwrap();

        let scorecard = Scorecard::new(offense.path(), kickers.path(), defense.path()).unwrap();
        assert_eq!(scorecard.kickers().series(), vec![("fg", "made", 3.0)]);
        assert_eq!(scorecard.defensest().kind(), SchemeKind::DefenseST);
    }
}
