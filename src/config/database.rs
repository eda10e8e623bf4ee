use serde::Deserialize;
use std::num::{NonZeroU32, NonZeroU64};

use crate::util::Sensitive;

/// Configuration for connecting to the Postgres database
#[derive(Debug, Deserialize)]
pub struct Database {
  /// Connection URL connecting to the Postgres database.
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_URL` or `DATABASE_URL`
  pub url: Sensitive<String>,
  /// Minimum idle database connections just to avoid wasting
  /// hardware resources from the database server.
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_MIN_IDLE`
  pub min_idle: Option<NonZeroU32>,
  /// Maximum amount of pool size that database can handle
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_POOL_SIZE`
  #[serde(default = "Database::default_pool_size")]
  pub pool_size: NonZeroU32,
  /// Forces all database connections are encrypted with TLS
  /// (if possible).
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_ENFORCE_TLS`
  #[serde(default = "Database::default_enforce_tls")]
  pub enforce_tls: bool,
  /// How long this server can wait until its time limit where the
  /// database connection takes a while to acknowledge or
  /// successfully established.
  ///
  /// **Environment variables**:
  /// - `QUILL_DB_TIMEOUT_SECS`
  #[serde(default = "Database::default_pool_timeout_secs")]
  pub timeout_secs: NonZeroU64,
}

impl Database {
  const DEFAULT_POOL_SIZE: u32 = 5;
  const DEFAULT_POOL_TIMEOUT_SECS: u64 = 5;

  // Required by serde
  const fn default_pool_size() -> NonZeroU32 {
    match NonZeroU32::new(Self::DEFAULT_POOL_SIZE) {
      Some(n) => n,
      None => panic!("DEFAULT_POOL_SIZE is accidentally set to 0"),
    }
  }

  const fn default_pool_timeout_secs() -> NonZeroU64 {
    match NonZeroU64::new(Self::DEFAULT_POOL_TIMEOUT_SECS) {
      Some(n) => n,
      None => panic!("DEFAULT_POOL_TIMEOUT_SECS is accidentally set to 0"),
    }
  }

  const fn default_enforce_tls() -> bool {
    true
  }
}
