use actix_web::{
  http::header,
  web::{self, Json},
  HttpRequest, HttpResponse,
};

use crate::{
  database::ErrorExt2,
  http::Error,
  schema::{NewUser, PublicUser},
  types::{self, form::users::register},
  util::password,
  App,
};

#[tracing::instrument(skip_all, name = "http.users.register")]
pub async fn register(
  req: HttpRequest,
  app: web::Data<App>,
  form: Json<register::Request>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner().validate()?;

  if app.store.has_user_with_name(&form.user_name).await? {
    return Err(types::Error::DuplicateUsername.into());
  }

  let password_hash = password::hash(form.password).await?;
  let user = app
    .store
    .insert_user(NewUser {
      user_name: &form.user_name,
      full_name: &form.full_name,
      nickname: &form.nickname,
      password_hash: &password_hash,
    })
    .await
    .map_err(|e| {
      if e.is_unique_violation() {
        Error::from_report(types::Error::DuplicateUsername, e)
      } else {
        Error::from(e)
      }
    })?;

  tracing::info!(user.id = %user.id, "registered new user");

  let location = format!("{}/{}", req.path().trim_end_matches('/'), user.id);
  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location))
      .json(PublicUser::from(&user)),
  )
}
