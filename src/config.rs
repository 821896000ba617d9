//! Environment-driven settings.

use std::{net::SocketAddr, path::PathBuf};

use dirs::cache_dir;

use crate::{error::HistoryError, Result};

pub const DATABASE_ENV_VAR: &str = "FFL_HISTORY_DATABASE";
pub const BIND_ENV_VAR: &str = "FFL_HISTORY_BIND";
pub const API_BASE_ENV_VAR: &str = "ESPN_API_BASE";
pub const SWID_ENV_VAR: &str = "ESPN_SWID";
pub const ESPN_S2_ENV_VAR: &str = "ESPN_S2";

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// ESPN cookie credentials. Both are opaque and never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EspnCredentials {
    pub swid: Option<String>,
    pub espn_s2: Option<String>,
}

impl EspnCredentials {
    pub fn new(swid: impl Into<String>, espn_s2: impl Into<String>) -> Self {
        Self {
            swid: Some(swid.into()),
            espn_s2: Some(espn_s2.into()),
        }
    }

    /// Read `ESPN_SWID` / `ESPN_S2`. Empty values count as missing.
    pub fn from_env() -> Self {
        Self {
            swid: non_empty_var(SWID_ENV_VAR),
            espn_s2: non_empty_var(ESPN_S2_ENV_VAR),
        }
    }
}

/// Runtime settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub api_base: Option<String>,
    pub credentials: EspnCredentials,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_path = match non_empty_var(DATABASE_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let bind = non_empty_var(BIND_ENV_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind.parse().map_err(|e| HistoryError::Config {
            message: format!("{BIND_ENV_VAR}={bind}: {e}"),
        })?;

        Ok(Self {
            database_path,
            bind_addr,
            api_base: non_empty_var(API_BASE_ENV_VAR),
            credentials: EspnCredentials::from_env(),
        })
    }
}

/// `<cache_dir>/ffl-history/ledger.db`
pub fn default_database_path() -> Result<PathBuf> {
    let cache_dir = cache_dir().ok_or_else(|| HistoryError::Config {
        message: "Could not determine cache directory".to_string(),
    })?;
    Ok(cache_dir.join("ffl-history").join("ledger.db"))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; keep everything touching them in one test.
    #[test]
    fn test_settings_from_env() {
        std::env::set_var(DATABASE_ENV_VAR, "/tmp/ffl-test/ledger.db");
        std::env::set_var(BIND_ENV_VAR, "0.0.0.0:9001");
        std::env::set_var(SWID_ENV_VAR, "{ABC}");
        std::env::set_var(ESPN_S2_ENV_VAR, "");
        std::env::remove_var(API_BASE_ENV_VAR);

        let settings = Settings::from_env().unwrap();
        assert_eq!(
            settings.database_path,
            PathBuf::from("/tmp/ffl-test/ledger.db")
        );
        assert_eq!(settings.bind_addr, "0.0.0.0:9001".parse().unwrap());
        assert_eq!(settings.credentials.swid.as_deref(), Some("{ABC}"));
        assert_eq!(settings.credentials.espn_s2, None);
        assert_eq!(settings.api_base, None);

        std::env::set_var(BIND_ENV_VAR, "not-an-addr");
        assert!(matches!(
            Settings::from_env(),
            Err(HistoryError::Config { .. })
        ));

        std::env::remove_var(DATABASE_ENV_VAR);
        std::env::remove_var(BIND_ENV_VAR);
        std::env::remove_var(SWID_ENV_VAR);
        std::env::remove_var(ESPN_S2_ENV_VAR);
    }

    #[test]
    fn test_default_database_path_file_name() {
        if let Ok(path) = default_database_path() {
            assert!(path.ends_with("ffl-history/ledger.db"));
        }
    }
}
