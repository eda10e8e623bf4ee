use actix_web::{web, HttpResponse};

use crate::{
  http::Error,
  types::{
    self,
    id::{marker::ArticleMarker, Id},
  },
  App,
};

const ARTICLE_NOT_FOUND: types::Error = types::Error::NotFound("Article doesn't exist");

fn article_id(raw: u64) -> Result<Id<ArticleMarker>, Error> {
  Id::new_checked(raw).ok_or_else(|| ARTICLE_NOT_FOUND.into())
}

#[tracing::instrument(skip_all, name = "http.articles.list")]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse, Error> {
  let articles = app.store.list_articles().await?;
  Ok(HttpResponse::Ok().json(articles))
}

#[tracing::instrument(skip(app), name = "http.articles.get")]
pub async fn get(app: web::Data<App>, path: web::Path<u64>) -> Result<HttpResponse, Error> {
  let id = article_id(path.into_inner())?;
  match app.store.find_article(id).await? {
    Some(article) => Ok(HttpResponse::Ok().json(article)),
    None => Err(ARTICLE_NOT_FOUND.into()),
  }
}

#[tracing::instrument(skip(app), name = "http.articles.comments")]
pub async fn comments(app: web::Data<App>, path: web::Path<u64>) -> Result<HttpResponse, Error> {
  let id = article_id(path.into_inner())?;
  if app.store.find_article(id).await?.is_none() {
    return Err(ARTICLE_NOT_FOUND.into());
  }

  let comments = app.store.list_comments(id).await?;
  Ok(HttpResponse::Ok().json(comments))
}
