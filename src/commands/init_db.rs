//! Database initialization command

use tracing::info;

use crate::{config::Settings, storage::LedgerDatabase, Result};

/// Handle the init-db command
pub fn handle_init_db(settings: &Settings, reset: bool) -> Result<()> {
    let mut db = LedgerDatabase::open(&settings.database_path)?;

    if reset {
        info!(path = %settings.database_path.display(), "dropping and recreating tables");
        db.reset_schema()?;
    }

    println!("✓ Database ready at {}", settings.database_path.display()); // tarpaulin::skip
    Ok(())
}
