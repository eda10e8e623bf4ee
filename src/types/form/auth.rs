use serde::{Deserialize, Serialize};

use super::required;
use crate::types::Error;
use crate::util::Sensitive;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
  pub user_name: Option<String>,
  pub password: Option<Sensitive<String>>,
}

#[derive(Debug)]
pub struct ValidLogin {
  pub user_name: String,
  pub password: Sensitive<String>,
}

impl LoginRequest {
  pub fn validate(self) -> Result<ValidLogin, Error> {
    let user_name = required("user_name", self.user_name)?;
    let password = required("password", self.password.map(Sensitive::into_inner))?;
    Ok(ValidLogin {
      user_name,
      password: Sensitive::new(password),
    })
  }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  #[serde(rename = "authToken")]
  pub auth_token: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_fields_in_order() {
    let error = LoginRequest::default().validate().unwrap_err();
    assert_eq!(error, Error::MissingField("user_name"));

    let request = LoginRequest {
      user_name: Some("dunder".into()),
      password: Some(Sensitive::new(String::new())),
    };
    assert_eq!(request.validate().unwrap_err(), Error::MissingField("password"));
  }

  #[test]
  fn test_response_field_name() {
    let response = LoginResponse { auth_token: "token".into() };
    assert_eq!(
      serde_json::to_value(response).unwrap(),
      serde_json::json!({ "authToken": "token" })
    );
  }
}
