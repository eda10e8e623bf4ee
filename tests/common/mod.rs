#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use actix_web::{http::header, web};
use quill::{
  config,
  schema::{Article, ArticleStyle, NewArticle, NewUser, User},
  store::{MemoryStore, Store},
  util::{password, Sensitive},
  App,
};
use std::sync::Arc;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "Sup3rSecret";

pub struct TestApp {
  pub app: App,
  pub store: Arc<MemoryStore>,
}

impl TestApp {
  pub fn new() -> Self {
    let store = Arc::new(MemoryStore::new());
    let app = App::with_store(
      &config::Jwt::new(JWT_SECRET),
      store.clone() as Arc<dyn Store>,
    );
    Self { app, store }
  }

  /// Route configuration for `actix_web::App::configure`.
  pub fn routes(&self) -> impl FnOnce(&mut web::ServiceConfig) {
    quill::http::configure(self.app.clone())
  }

  pub async fn seed_user(&self, user_name: &str) -> User {
    use quill::store::UserStore;

    let password_hash = password::hash(Sensitive::new(PASSWORD.to_string()))
      .await
      .unwrap();

    self
      .store
      .insert_user(NewUser {
        user_name,
        full_name: "Seeded User",
        nickname: "",
        password_hash: &password_hash,
      })
      .await
      .unwrap()
  }

  pub async fn seed_article(&self, author: &User) -> Article {
    use quill::store::ArticleStore;

    self
      .store
      .insert_article(NewArticle {
        title: "Seeded article",
        content: "Lorem ipsum",
        style: ArticleStyle::News,
        author_id: Some(author.id),
      })
      .await
      .unwrap()
  }

  pub fn token_for(&self, user: &User) -> String {
    self.app.jwt.issue(user).unwrap()
  }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
  (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Signs a token for `user` with a secret other than [`JWT_SECRET`].
pub fn forged_token(user: &User) -> String {
  let keys = quill::http::jwt::Keys::new(&config::Jwt::new("some-other-secret"));
  keys.issue(user).unwrap()
}
