use serde::{ser::SerializeMap, Serialize};
use std::fmt::Display;

use super::validation::PasswordRule;

/// Every failure a client can observe from the API.
///
/// It is always serialized as `{ "error": "<message>" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// A required field is absent from the request body.
  MissingField(&'static str),
  /// The password does not comply with the password policy.
  WeakPassword(PasswordRule),
  DuplicateUsername,
  InvalidCredentials,
  /// The request body cannot be parsed into the expected shape.
  InvalidBody,
  /// The referenced article does not exist.
  UnknownArticle,
  NotFound(&'static str),
  /// No bearer token was presented on a protected route.
  AuthMissing,
  /// The bearer token was rejected, no matter why.
  AuthInvalid,
  ReadonlyMode,
  Internal,
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingField(field) => write!(f, "Missing '{field}' in request body"),
      Self::WeakPassword(rule) => Display::fmt(rule, f),
      Self::DuplicateUsername => f.write_str("Username already taken"),
      Self::InvalidCredentials => f.write_str("Incorrect user_name or password"),
      Self::InvalidBody => f.write_str("Invalid request body"),
      Self::UnknownArticle => f.write_str("Article doesn't exist"),
      Self::NotFound(message) => f.write_str(message),
      Self::AuthMissing => f.write_str("Missing bearer token"),
      Self::AuthInvalid => f.write_str("Unauthorized request"),
      Self::ReadonlyMode => f.write_str(
        "This service is currently in read only mode. Please try again later.",
      ),
      Self::Internal => f.write_str("Internal server error"),
    }
  }
}

impl std::error::Error for Error {}

impl Serialize for Error {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry("error", &self.to_string())?;
    map.end()
  }
}
