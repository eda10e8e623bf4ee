use error_stack::{Report, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroUsize;

use super::ParseError;
use crate::util::figment::FigmentErrorAttachable;

#[derive(Debug, Deserialize)]
pub struct Server {
  /// **Environment variables**:
  /// - `QUILL_IP`
  #[serde(default = "Server::default_ip")]
  pub ip: IpAddr,
  /// **Environment variables**:
  /// - `QUILL_PORT` or `PORT`
  #[serde(default = "Server::default_port")]
  pub port: u16,
  /// Amount of HTTP workers. Defaults to the number of
  /// physical CPU cores if not set.
  ///
  /// **Environment variables**:
  /// - `QUILL_WORKERS`
  pub workers: Option<NonZeroUsize>,
  pub db: super::Database,
  pub jwt: super::Jwt,
  #[serde(default)]
  pub logging: super::Logging,
}

impl Server {
  pub fn load() -> Result<Self, ParseError> {
    let config = Self::figment()
      .extract::<Self>()
      .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<(), ParseError> {
    let mut report: Option<Report<ParseError>> = None;
    let mut fail = |message: &'static str| {
      let error = Report::new(ParseError).attach_printable(message);
      match report.as_mut() {
        Some(report) => report.extend_one(error),
        None => report = Some(error),
      }
    };

    if url::Url::parse(self.db.url.as_str()).is_err() {
      fail("db.url: Invalid Postgres connection URL");
    }

    if self.jwt.secret.as_str().chars().count() < super::Jwt::MIN_SECRET_LEN {
      fail("jwt.secret: JWT secret must be at least 12 characters long");
    }

    match report {
      Some(report) => Err(report),
      None => Ok(()),
    }
  }
}

impl Server {
  const DEFAULT_CONFIG_FILE: &'static str = "quill.toml";
  const DEFAULT_PORT: u16 = 8000;

  const fn default_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
  }

  const fn default_port() -> u16 {
    Self::DEFAULT_PORT
  }

  /// Creates a default [`Figment`] object to load server
  /// configuration. This function is there for implementing
  /// [`Server::load`] and testing.
  ///
  /// [`Figment`]: figment::Figment
  pub(crate) fn figment() -> figment::Figment {
    use figment::{
      providers::{Env, Format, Toml},
      Figment,
    };

    Figment::new()
      .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
      // One big con about figment (env provider to be specific) especially
      // these fields with underscore in it.
      .merge(
        Env::prefixed("QUILL_").map(|v| match v.as_str().to_ascii_lowercase().as_str() {
          "db_enforce_tls" => "db.enforce_tls".into(),
          "db_min_idle" => "db.min_idle".into(),
          "db_pool_size" => "db.pool_size".into(),
          "db_timeout_secs" => "db.timeout_secs".into(),
          "jwt_expiry_secs" => "jwt.expiry_secs".into(),
          _ => v.as_str().replace('_', ".").into(),
        }),
      )
      // Environment variable aliases
      .merge(
        Env::raw()
          .only(&["DATABASE_URL", "JWT_SECRET", "JWT_EXPIRY_SECS", "PORT"])
          .map(|v| match v.as_str().to_ascii_lowercase().as_str() {
            "database_url" => "db.url".into(),
            "jwt_secret" => "jwt.secret".into(),
            "jwt_expiry_secs" => "jwt.expiry_secs".into(),
            _ => v.into(),
          }),
      )
  }
}
