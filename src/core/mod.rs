pub mod draft;
pub mod points;
pub mod research;
pub mod roster;
pub mod scoring;

pub use crate::domain::model::{Pick, Player, Provider, TradeSummary, Transaction};
pub use crate::domain::ports::{PageFetcher, Storage};
pub use crate::utils::error::Result;
