use error_stack::{Result, ResultExt};
use thiserror::Error;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Logging, LoggingStyle};

#[derive(Debug, Error)]
#[error("Failed to initialize logging")]
pub struct InitLoggingError;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter so
/// operators can raise verbosity without touching the config file.
pub fn init(cfg: &Logging) -> Result<(), InitLoggingError> {
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(..) => EnvFilter::try_new(&cfg.filter)
      .change_context(InitLoggingError)
      .attach_printable_lazy(|| format!("invalid logging filter {:?}", cfg.filter))?,
  };

  let registry = tracing_subscriber::registry()
    .with(filter)
    .with(ErrorLayer::default());

  let result = match cfg.style {
    LoggingStyle::Compact => registry.with(fmt::layer().compact()).try_init(),
    LoggingStyle::Full => registry.with(fmt::layer()).try_init(),
    LoggingStyle::Pretty => registry.with(fmt::layer().pretty()).try_init(),
    LoggingStyle::Json => registry.with(fmt::layer().json()).try_init(),
  };
  result.change_context(InitLoggingError)
}
