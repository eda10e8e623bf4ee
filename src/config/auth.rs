use serde::Deserialize;
use std::num::NonZeroU64;

use crate::util::Sensitive;

/// Bearer token settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwt {
  /// Secret used to sign and verify HS256 tokens.
  ///
  /// **Environment variables**:
  /// - `QUILL_JWT_SECRET` or `JWT_SECRET`
  pub secret: Sensitive<String>,
  /// How many seconds an issued token stays valid.
  ///
  /// **Environment variables**:
  /// - `QUILL_JWT_EXPIRY_SECS` or `JWT_EXPIRY_SECS`
  #[serde(default = "Jwt::default_expiry_secs")]
  pub expiry_secs: NonZeroU64,
}

impl Jwt {
  pub(crate) const MIN_SECRET_LEN: usize = 12;
  const DEFAULT_EXPIRY_SECS: u64 = 60 * 60;

  #[must_use]
  pub fn new(secret: impl Into<String>) -> Self {
    Self {
      secret: Sensitive::new(secret.into()),
      expiry_secs: Self::default_expiry_secs(),
    }
  }

  const fn default_expiry_secs() -> NonZeroU64 {
    match NonZeroU64::new(Self::DEFAULT_EXPIRY_SECS) {
      Some(n) => n,
      None => panic!("DEFAULT_EXPIRY_SECS is accidentally set to 0"),
    }
  }
}
