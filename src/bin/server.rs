use anyhow::Context;
use trivia_api::db;
use trivia_api::server::app::{run_server, AppState};
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load().context("Failed to load configuration")?;
    let pool = db::establish_connection(&settings.database)
        .await
        .with_context(|| format!("Cannot open database at {}", settings.database.path))?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let state = AppState {
        pool,
        selection: settings.quiz.selection,
    };
    run_server(state, settings.application.address()).await
}
