pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::LeagueConfig;

pub use crate::adapters::{HttpFetcher, LocalStorage};
pub use crate::core::draft::SnakeDraft;
pub use crate::core::points::{PointScheme, Scorecard};
pub use crate::core::research::{PlayersQuery, ResearchTable};
pub use crate::core::roster::{Positions, Roster};
pub use crate::core::scoring::{EspnScoring, ScoringSchema, YahooScoring};
pub use crate::domain::model::{Pick, Player, Provider};
pub use crate::utils::error::{FantasyError, Result};
