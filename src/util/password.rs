use error_stack::{Result, ResultExt};
use thiserror::Error;

use crate::{types::validation::PASSWORD_MAX_BYTES, util::Sensitive};

/// Work factor given to bcrypt for every stored password.
pub const HASH_COST: u32 = 12;

#[derive(Debug, Error)]
#[error("Failed to hash password")]
pub struct HashPasswordError;

#[derive(Debug, Error)]
#[error("Failed to verify password")]
pub struct VerifyPasswordError;

/// Derives a salted bcrypt hash from the plaintext password.
///
/// Hashing is deliberately slow so it runs on the blocking
/// thread pool instead of the async executor.
#[tracing::instrument(skip_all, name = "password.hash")]
pub async fn hash(password: Sensitive<String>) -> Result<String, HashPasswordError> {
  tokio::task::spawn_blocking(move || bcrypt::hash(password.as_str(), HASH_COST))
    .await
    .change_context(HashPasswordError)?
    .change_context(HashPasswordError)
}

/// Checks the plaintext password against a stored bcrypt hash.
#[tracing::instrument(skip_all, name = "password.verify")]
pub async fn verify(password: Sensitive<String>, hash: String) -> Result<bool, VerifyPasswordError> {
  // bcrypt would only compare a prefix of longer inputs
  if password.as_str().len() > PASSWORD_MAX_BYTES {
    return Ok(false);
  }

  tokio::task::spawn_blocking(move || bcrypt::verify(password.as_str(), &hash))
    .await
    .change_context(VerifyPasswordError)?
    .change_context(VerifyPasswordError)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_hash_and_verify() {
    let hash = hash(Sensitive::new("Sup3rSecret".into())).await.unwrap();
    assert_ne!(hash, "Sup3rSecret");
    assert!(hash.starts_with("$2b$12$"));

    assert!(verify(Sensitive::new("Sup3rSecret".into()), hash.clone())
      .await
      .unwrap());
    assert!(!verify(Sensitive::new("sup3rsecret".into()), hash)
      .await
      .unwrap());
  }

  #[tokio::test]
  async fn test_verify_rejects_input_past_bcrypt_limit() {
    let stored = format!("Aa1{}", "c".repeat(69));
    let hash = hash(Sensitive::new(stored.clone())).await.unwrap();
    assert!(verify(Sensitive::new(stored.clone()), hash.clone())
      .await
      .unwrap());

    let longer = format!("{stored}-and-more");
    assert!(!verify(Sensitive::new(longer), hash).await.unwrap());
  }

  #[tokio::test]
  async fn test_verify_rejects_malformed_hash() {
    let result = verify(Sensitive::new("Sup3rSecret".into()), "not a hash".into()).await;
    assert!(result.is_err());
  }
}
