use serde::{Deserialize, Serialize};
use std::fmt;

/// A rostered or draftable player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Natural position code, e.g. `QB` or the provider's defense code.
    pub position: String,
    /// Whether the player may be placed on the Injured Reserve list.
    #[serde(default)]
    pub injured_reserve: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            injured_reserve: false,
        }
    }

    pub fn injured(mut self) -> Self {
        self.injured_reserve = true;
        self
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.injured_reserve {
            write!(f, "{} ({}, IR)", self.name, self.position)
        } else {
            write!(f, "{} ({})", self.name, self.position)
        }
    }
}

/// Round and overall pick number of a draft selection, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pick {
    pub round: usize,
    pub pick: usize,
}

/// Outcome of an add/drop transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transaction {
    pub added: Vec<Player>,
    pub dropped: Vec<Player>,
}

/// Outcome of a trade, one transaction per side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradeSummary {
    pub ours: Transaction,
    pub theirs: Transaction,
}

/// Fantasy platform whose conventions (position codes, default scoring) apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Provider {
    Espn,
    Yahoo,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Espn => write!(f, "ESPN"),
            Provider::Yahoo => write!(f, "Yahoo!"),
        }
    }
}
