//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use ffl_history::{
    cli::{Commands, FflHistory},
    commands::{
        history::handle_history, import_league::handle_import_league, init_db::handle_init_db,
        serve::handle_serve,
    },
    config::Settings,
    tracing_setup::init_tracing,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = FflHistory::parse();
    init_tracing(app.debug)?;

    let mut settings = Settings::from_env()?;
    if let Some(path) = app.database {
        settings.database_path = path;
    }

    match app.command {
        Commands::Import {
            league_id,
            scoring_period_id,
        } => {
            // The import transaction has already rolled back by the time the error gets here.
            if let Err(e) = handle_import_league(&settings, league_id, scoring_period_id).await {
                eprintln!("❌ Error importing league: {e}");
                std::process::exit(1);
            }
        }

        Commands::History {
            league_id,
            scoring_period_id,
            json,
        } => handle_history(&settings, league_id, scoring_period_id, json).await?,

        Commands::InitDb { reset } => handle_init_db(&settings, reset)?,

        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                settings.bind_addr = bind;
            }
            handle_serve(&settings).await?
        }
    }

    Ok(())
}
