//! Command implementations for the ffl-history CLI

pub mod history;
pub mod import_league;
pub mod init_db;
pub mod serve;

use crate::{
    config::Settings,
    espn::EspnClient,
    Result,
};

/// Build an ESPN client from settings, honouring an API base override.
pub(crate) fn espn_client(settings: &Settings) -> Result<EspnClient> {
    match &settings.api_base {
        Some(base) => EspnClient::with_base_url(base.as_str(), &settings.credentials),
        None => EspnClient::new(&settings.credentials),
    }
}
