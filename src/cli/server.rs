use clap::Parser;
use error_stack::{Result, ResultExt};
use quill::{
  config::Server as Config,
  http::StartServerError,
  store::MemoryStore,
  util::logging,
  App,
};
use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Expose the quill API HTTP server
#[derive(Debug, Parser)]
pub struct ServerCommand {
  #[clap(long)]
  pub address: Option<IpAddr>,
  #[clap(long)]
  pub port: Option<u16>,
  #[clap(long)]
  pub workers: Option<NonZeroUsize>,
  /// Keep every record in memory instead of Postgres. Data is lost
  /// once the server stops.
  #[clap(long)]
  pub in_memory: bool,
}

pub fn run(args: ServerCommand) -> Result<(), StartServerError> {
  dotenvy::dotenv().ok();

  let mut config = Config::load().change_context(StartServerError)?;
  args.override_config(&mut config);

  logging::init(&config.logging).change_context(StartServerError)?;
  actix_web::rt::System::new().block_on(async move {
    let app = if args.in_memory {
      tracing::warn!("using the in-memory store; nothing will be persisted");
      App::with_store(&config.jwt, Arc::new(MemoryStore::new()))
    } else {
      App::new(&config).await.change_context(StartServerError)?
    };

    quill::http::run(config, app).await
  })
}

impl ServerCommand {
  fn override_config(&self, config: &mut Config) {
    // override server configurations if set by the cli
    if let Some(address) = self.address {
      config.ip = address;
    }

    if let Some(port) = self.port {
      config.port = port;
    }

    if let Some(workers) = self.workers {
      config.workers = Some(workers);
    }
  }
}
