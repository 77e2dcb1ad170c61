//! Riot account resolution, ranked standings and rank decay projection.
//!
//! The crate resolves a player from a Riot ID or a PUUID against the
//! regionally sharded Riot API, fetches their ranked entries and derives how
//! close their Solo/Duo rank is to inactivity decay. Presentation, storage and
//! scheduling are left to the caller.

pub mod activity;
pub mod champions;
pub mod config;
pub mod decay;
pub mod error;
pub mod identity;
pub mod logging;
pub mod ranked;
pub mod riot;

pub use activity::{RankedActivitySource, RecentRankedMatch};
pub use champions::ChampionTable;
pub use config::Config;
pub use decay::{DecayAssessment, DecayClassification, SignalSource, assess_decay};
pub use error::{AppError, FetchError};
pub use identity::{AccountRecord, PlayerIdentity};
pub use ranked::RankedEntry;
pub use riot::{RegionCode, RiotClient};
