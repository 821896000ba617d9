//! Serve command implementation

use crate::{
    api::{run_server, ServerConfig},
    config::Settings,
    Result,
};

/// Handle the serve command
pub async fn handle_serve(settings: &Settings) -> Result<()> {
    run_server(ServerConfig {
        bind_addr: settings.bind_addr,
        database_path: settings.database_path.clone(),
    })
    .await?;
    Ok(())
}
