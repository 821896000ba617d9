//! ESPN Fantasy API access: the HTTP client and the payload types it returns.

pub mod http;
pub mod types;

pub use http::EspnClient;
pub use types::{parse_history, HistoryEntry, LeagueSettings, Member, TeamEntry};
