use serde::Deserialize;

use crate::types::{form::required, validation::validate_password, Error};
use crate::util::Sensitive;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Request {
  pub user_name: Option<String>,
  pub full_name: Option<String>,
  pub password: Option<Sensitive<String>>,
  pub nickname: Option<String>,
}

/// A registration request that passed every field and
/// password policy check.
#[derive(Debug)]
pub struct ValidRegistration {
  pub user_name: String,
  pub full_name: String,
  pub password: Sensitive<String>,
  pub nickname: String,
}

impl Request {
  /// Checks the required fields in the order `full_name`, `user_name`,
  /// `password` and then the password policy, stopping at the first failure.
  pub fn validate(self) -> Result<ValidRegistration, Error> {
    let full_name = required("full_name", self.full_name)?;
    let user_name = required("user_name", self.user_name)?;
    let password = required("password", self.password.map(Sensitive::into_inner))?;
    validate_password(&password).map_err(Error::WeakPassword)?;

    Ok(ValidRegistration {
      user_name,
      full_name,
      password: Sensitive::new(password),
      nickname: self.nickname.unwrap_or_default(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::validation::PasswordRule;

  fn request() -> Request {
    Request {
      user_name: Some("dunder".into()),
      full_name: Some("Dunder Mifflin".into()),
      password: Some(Sensitive::new("Paper1234".into())),
      nickname: None,
    }
  }

  #[test]
  fn test_missing_fields_in_order() {
    let error = Request::default().validate().unwrap_err();
    assert_eq!(error, Error::MissingField("full_name"));

    let error = Request { full_name: None, user_name: None, ..request() }
      .validate()
      .unwrap_err();
    assert_eq!(error, Error::MissingField("full_name"));

    let error = Request { user_name: None, password: None, ..request() }
      .validate()
      .unwrap_err();
    assert_eq!(error, Error::MissingField("user_name"));

    let error = Request { password: None, ..request() }.validate().unwrap_err();
    assert_eq!(error, Error::MissingField("password"));
  }

  #[test]
  fn test_empty_strings_are_missing() {
    let error = Request { user_name: Some(String::new()), ..request() }
      .validate()
      .unwrap_err();
    assert_eq!(error, Error::MissingField("user_name"));
  }

  #[test]
  fn test_weak_password() {
    let error = Request { password: Some(Sensitive::new("paper".into())), ..request() }
      .validate()
      .unwrap_err();
    assert_eq!(error, Error::WeakPassword(PasswordRule::TooShort));
  }

  #[test]
  fn test_nickname_defaults_to_empty() {
    let valid = request().validate().unwrap();
    assert_eq!(valid.nickname, "");
    assert_eq!(valid.user_name, "dunder");
    assert_eq!(valid.password.as_str(), "Paper1234");

    let valid = Request { nickname: Some("DM".into()), ..request() }
      .validate()
      .unwrap();
    assert_eq!(valid.nickname, "DM");
  }

  #[test]
  fn test_deserialize_tolerates_absent_and_null_fields() {
    let request: Request =
      serde_json::from_str(r#"{ "user_name": "dunder", "nickname": null }"#).unwrap();
    assert_eq!(request.user_name.as_deref(), Some("dunder"));
    assert!(request.full_name.is_none());
    assert!(request.nickname.is_none());
  }
}
