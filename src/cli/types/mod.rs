//! Type-safe wrappers for ESPN league identifiers and time periods.

pub mod ids;
pub mod time;
