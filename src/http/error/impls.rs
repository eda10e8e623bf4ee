use actix_web::{body::BoxBody, http::StatusCode, HttpResponse};
use error_stack::Report;

use super::Error;
use crate::{
  database::{self, ErrorExt2},
  types::{self, Error as ErrorType},
  util::password::{HashPasswordError, VerifyPasswordError},
};

impl actix_web::ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self.error_type {
      ErrorType::MissingField(..)
      | ErrorType::WeakPassword(..)
      | ErrorType::DuplicateUsername
      | ErrorType::InvalidCredentials
      | ErrorType::InvalidBody
      | ErrorType::UnknownArticle => StatusCode::BAD_REQUEST,
      ErrorType::NotFound(..) => StatusCode::NOT_FOUND,
      ErrorType::AuthMissing | ErrorType::AuthInvalid => StatusCode::UNAUTHORIZED,
      ErrorType::ReadonlyMode => StatusCode::SERVICE_UNAVAILABLE,
      ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse<BoxBody> {
    match self.error_type {
      ErrorType::Internal => tracing::error!("{self}"),
      ErrorType::ReadonlyMode => tracing::warn!("{self}"),
      _ => tracing::debug!(error = %self.error_type, "request rejected"),
    }
    HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<types::Error> for Error {
  fn from(value: types::Error) -> Self {
    Error::from_context(value, value)
  }
}

impl From<Report<database::Error>> for Error {
  fn from(value: Report<database::Error>) -> Self {
    if value.is_readonly() {
      Error::from_report(ErrorType::ReadonlyMode, value)
    } else {
      Error::from_report(ErrorType::Internal, value)
    }
  }
}

impl From<Report<HashPasswordError>> for Error {
  fn from(value: Report<HashPasswordError>) -> Self {
    Error::from_report(ErrorType::Internal, value)
  }
}

impl From<Report<VerifyPasswordError>> for Error {
  fn from(value: Report<VerifyPasswordError>) -> Self {
    Error::from_report(ErrorType::Internal, value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::validation::PasswordRule;
  use actix_web::ResponseError;

  #[test]
  fn test_status_codes() {
    let cases = [
      (ErrorType::MissingField("password"), StatusCode::BAD_REQUEST),
      (ErrorType::WeakPassword(PasswordRule::TooLong), StatusCode::BAD_REQUEST),
      (ErrorType::DuplicateUsername, StatusCode::BAD_REQUEST),
      (ErrorType::NotFound("Article doesn't exist"), StatusCode::NOT_FOUND),
      (ErrorType::AuthMissing, StatusCode::UNAUTHORIZED),
      (ErrorType::AuthInvalid, StatusCode::UNAUTHORIZED),
      (ErrorType::ReadonlyMode, StatusCode::SERVICE_UNAVAILABLE),
      (ErrorType::Internal, StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (error_type, status) in cases {
      assert_eq!(Error::from(error_type).status_code(), status, "{error_type:?}");
    }
  }

  #[test]
  fn test_database_errors() {
    let readonly = Error::from(Report::new(database::Error::Readonly));
    assert_eq!(readonly.as_type(), &ErrorType::ReadonlyMode);

    let unhealthy = Error::from(Report::new(database::Error::UnhealthyPool));
    assert_eq!(unhealthy.as_type(), &ErrorType::Internal);
    assert!(unhealthy.downcast_ref::<database::Error>().is_some());
  }
}
