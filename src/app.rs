use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::{
  config, database,
  http::jwt,
  store::{PgStore, Store},
};

/// Everything a request handler needs, shared across workers.
#[derive(Clone)]
pub struct App {
  pub jwt: jwt::Keys,
  pub store: Arc<dyn Store>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
  /// Connects to the configured Postgres database.
  #[tracing::instrument(skip_all)]
  pub async fn new(cfg: &config::Server) -> Result<Self, AppError> {
    let pool = database::Pool::new(&cfg.db)
      .await
      .change_context(AppError)?;

    Ok(Self::with_store(&cfg.jwt, Arc::new(PgStore::new(pool))))
  }

  #[must_use]
  pub fn with_store(cfg: &config::Jwt, store: Arc<dyn Store>) -> Self {
    Self {
      jwt: jwt::Keys::new(cfg),
      store,
    }
  }
}

impl std::fmt::Debug for App {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("App")
      .field("jwt", &self.jwt)
      .finish_non_exhaustive()
  }
}
