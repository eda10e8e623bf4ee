use chrono::Utc;
use error_stack::{Result, ResultExt};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
  config,
  schema::User,
  types::id::{marker::UserMarker, Id},
};

/// Claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Claims {
  /// User name of the token owner.
  pub sub: String,
  pub user_id: Id<UserMarker>,
  pub iat: i64,
  pub exp: i64,
}

impl Claims {
  #[must_use]
  pub fn new(user: &User, expiry_secs: u64) -> Self {
    let iat = Utc::now().timestamp();
    let expiry_secs = i64::try_from(expiry_secs).unwrap_or(i64::MAX);
    Self {
      sub: user.user_name.clone(),
      user_id: user.id,
      iat,
      exp: iat.saturating_add(expiry_secs),
    }
  }
}

#[derive(Debug, Error)]
#[error("Failed to encode JWT")]
pub struct EncodeJwtError;

#[derive(Debug, Error)]
#[error("Failed to decode JWT")]
pub struct DecodeJwtError;

/// HS256 signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct Keys {
  encoding: EncodingKey,
  decoding: DecodingKey,
  expiry_secs: u64,
}

impl Keys {
  #[must_use]
  pub fn new(cfg: &config::Jwt) -> Self {
    let secret = cfg.secret.as_str().as_bytes();
    Self {
      encoding: EncodingKey::from_secret(secret),
      decoding: DecodingKey::from_secret(secret),
      expiry_secs: cfg.expiry_secs.get(),
    }
  }

  /// Issues a token for the user that expires after the configured
  /// amount of seconds.
  pub fn issue(&self, user: &User) -> Result<String, EncodeJwtError> {
    self.encode(&Claims::new(user, self.expiry_secs))
  }

  #[tracing::instrument(skip_all, name = "jwt.encode")]
  pub fn encode(&self, claims: &Claims) -> Result<String, EncodeJwtError> {
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
      .change_context(EncodeJwtError)
  }

  /// Verifies the signature and expiry of the token.
  #[tracing::instrument(skip_all, name = "jwt.decode")]
  pub fn decode(&self, token: &str) -> Result<Claims, DecodeJwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);

    jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
      .map(|data| data.claims)
      .change_context(DecodeJwtError)
  }
}

impl std::fmt::Debug for Keys {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Keys")
      .field("expiry_secs", &self.expiry_secs)
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn user() -> User {
    User {
      id: Id::new(42),
      user_name: "dunder".into(),
      full_name: "Dunder Mifflin".into(),
      nickname: String::new(),
      password_hash: String::new(),
      date_created: Utc.timestamp_opt(0, 0).unwrap(),
      date_modified: None,
    }
  }

  #[test]
  fn test_issue_and_decode() {
    let keys = Keys::new(&config::Jwt::new("a-very-secret-key"));
    let token = keys.issue(&user()).unwrap();

    let claims = keys.decode(&token).unwrap();
    assert_eq!(claims.sub, "dunder");
    assert_eq!(claims.user_id, Id::new(42));
    assert_eq!(claims.exp - claims.iat, 3600);
  }

  #[test]
  fn test_rejects_other_secret() {
    let keys = Keys::new(&config::Jwt::new("a-very-secret-key"));
    let other = Keys::new(&config::Jwt::new("another-secret-key"));
    let token = other.issue(&user()).unwrap();
    assert!(keys.decode(&token).is_err());
  }

  #[test]
  fn test_rejects_expired_token() {
    let keys = Keys::new(&config::Jwt::new("a-very-secret-key"));
    let mut claims = Claims::new(&user(), 3600);
    claims.iat -= 7200;
    claims.exp -= 7200;

    let token = keys.encode(&claims).unwrap();
    assert!(keys.decode(&token).is_err());
  }

  #[test]
  fn test_rejects_garbage() {
    let keys = Keys::new(&config::Jwt::new("a-very-secret-key"));
    assert!(keys.decode("not.a.token").is_err());
    assert!(keys.decode("").is_err());
  }
}
