use actix_web::{
  web::{self, Json},
  HttpResponse,
};
use thiserror::Error as ThisError;

use crate::{
  http::Error,
  types::{self, form::auth},
  util::password,
  App,
};

#[derive(Debug, ThisError)]
#[error("Login attempt failed")]
struct LoginFailed;

#[tracing::instrument(skip_all, name = "http.auth.login")]
pub async fn login(
  app: web::Data<App>,
  form: Json<auth::LoginRequest>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner().validate()?;

  let Some(user) = app.store.find_user_by_name(&form.user_name).await? else {
    return Err(
      Error::from_context(types::Error::InvalidCredentials, LoginFailed)
        .attach_printable("unknown user"),
    );
  };

  if !password::verify(form.password, user.password_hash.clone()).await? {
    return Err(
      Error::from_context(types::Error::InvalidCredentials, LoginFailed)
        .attach_printable("wrong password"),
    );
  }

  let auth_token = app
    .jwt
    .issue(&user)
    .map_err(|e| Error::from_report(types::Error::Internal, e))?;

  Ok(HttpResponse::Ok().json(auth::LoginResponse { auth_token }))
}
