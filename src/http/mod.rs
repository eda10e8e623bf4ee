use actix_web::{web, HttpServer};
use error_stack::{Result, ResultExt};
use thiserror::Error as ThisError;
use tracing_actix_web::TracingLogger;

use crate::{config, types, App};

pub mod actor;
pub mod auth;
pub mod controllers;
pub mod error;
pub mod jwt;

pub use actor::Actor;
pub use error::Error;

#[derive(Debug, ThisError)]
#[error("Failed to start HTTP server")]
pub struct StartServerError;

#[derive(Debug, ThisError)]
#[error("Could not parse JSON body: {0}")]
struct InvalidJsonBody(String);

/// Registers the shared [`App`] and every API route.
pub fn configure(app: App) -> impl FnOnce(&mut web::ServiceConfig) {
  move |cfg: &mut web::ServiceConfig| {
    let json_cfg = web::JsonConfig::default().error_handler(|err, _req| {
      Error::from_context(types::Error::InvalidBody, InvalidJsonBody(err.to_string())).into()
    });

    cfg
      .app_data(web::Data::new(app))
      .app_data(json_cfg)
      .configure(controllers::configure);
  }
}

pub async fn run(cfg: config::Server, app: App) -> Result<(), StartServerError> {
  let mut server = HttpServer::new(move || {
    actix_web::App::new()
      .wrap(TracingLogger::default())
      .configure(configure(app.clone()))
  });

  if let Some(workers) = cfg.workers {
    server = server.workers(workers.get());
  }

  tracing::info!("listening on http://{}:{}", cfg.ip, cfg.port);
  server
    .bind((cfg.ip, cfg.port))
    .change_context(StartServerError)
    .attach_printable_lazy(|| format!("could not bind to {}:{}", cfg.ip, cfg.port))?
    .run()
    .await
    .change_context(StartServerError)
}
