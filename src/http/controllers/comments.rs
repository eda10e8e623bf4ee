use actix_web::{
  http::header,
  web::{self, Json},
  HttpResponse,
};

use crate::{
  http::{Actor, Error},
  schema::NewComment,
  types::{self, form::comments},
  App,
};

#[tracing::instrument(skip_all, name = "http.comments.create")]
pub async fn create(
  app: web::Data<App>,
  actor: Actor,
  form: Json<comments::Request>,
) -> Result<HttpResponse, Error> {
  let form = form.into_inner().validate()?;
  if app.store.find_article(form.article_id).await?.is_none() {
    return Err(types::Error::UnknownArticle.into());
  }

  let user = actor.into_user();
  let comment = app
    .store
    .insert_comment(NewComment {
      text: &form.text,
      article_id: form.article_id,
      user_id: user.id,
    })
    .await?;

  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, format!("/api/comments/{}", comment.id)))
      .json(comment),
  )
}
