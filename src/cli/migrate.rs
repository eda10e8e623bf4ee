use clap::Parser;
use error_stack::{Report, Result, ResultExt};
use quill::{config::Server as Config, database, util::logging};
use thiserror::Error;

/// Apply pending database migrations
#[derive(Debug, Parser)]
pub struct MigrateCommand {}

#[derive(Debug, Error)]
#[error("Failed to migrate the database")]
pub struct MigrateError;

pub fn run(_args: MigrateCommand) -> Result<(), MigrateError> {
  dotenvy::dotenv().ok();

  let config = Config::load().change_context(MigrateError)?;
  logging::init(&config.logging).change_context(MigrateError)?;

  actix_web::rt::System::new().block_on(async move {
    let pool = database::Pool::new(&config.db)
      .await
      .change_context(MigrateError)?;

    pool.migrate().await.change_context(MigrateError)?;
    tracing::info!("database is up to date");
    Ok::<_, Report<MigrateError>>(())
  })
}
