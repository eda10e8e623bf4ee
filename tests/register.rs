#![allow(clippy::unwrap_used)]

use actix_web::{
  http::{header, StatusCode},
  test, App,
};
use async_trait::async_trait;
use quill::{
  config,
  database::Result as DbResult,
  schema::{Article, ArticleView, CommentView, NewArticle, NewComment, NewUser, User},
  store::{ArticleStore, MemoryStore, UserStore},
  types::id::{marker::ArticleMarker, Id},
  util::{password, Sensitive},
};
use serde_json::{json, Value};
use std::sync::Arc;

mod common;
use common::{TestApp, JWT_SECRET};

/// Never sees an existing user name, so only the insert itself can
/// catch a duplicate.
struct BlindStore(MemoryStore);

#[async_trait]
impl UserStore for BlindStore {
  async fn has_user_with_name(&self, _user_name: &str) -> DbResult<bool> {
    Ok(false)
  }

  async fn find_user_by_name(&self, user_name: &str) -> DbResult<Option<User>> {
    self.0.find_user_by_name(user_name).await
  }

  async fn insert_user(&self, new_user: NewUser<'_>) -> DbResult<User> {
    self.0.insert_user(new_user).await
  }
}

#[async_trait]
impl ArticleStore for BlindStore {
  async fn list_articles(&self) -> DbResult<Vec<ArticleView>> {
    self.0.list_articles().await
  }

  async fn find_article(&self, id: Id<ArticleMarker>) -> DbResult<Option<ArticleView>> {
    self.0.find_article(id).await
  }

  async fn insert_article(&self, new_article: NewArticle<'_>) -> DbResult<Article> {
    self.0.insert_article(new_article).await
  }

  async fn list_comments(&self, article_id: Id<ArticleMarker>) -> DbResult<Vec<CommentView>> {
    self.0.list_comments(article_id).await
  }

  async fn insert_comment(&self, new_comment: NewComment<'_>) -> DbResult<CommentView> {
    self.0.insert_comment(new_comment).await
  }
}

async fn register(t: &TestApp, body: Value) -> (StatusCode, Option<String>, Value) {
  let service = test::init_service(App::new().configure(t.routes())).await;
  let req = test::TestRequest::post()
    .uri("/api/users")
    .set_json(body)
    .to_request();

  let resp = test::call_service(&service, req).await;
  let status = resp.status();
  let location = resp
    .headers()
    .get(header::LOCATION)
    .map(|v| v.to_str().unwrap().to_string());

  let body: Value = test::read_body_json(resp).await;
  (status, location, body)
}

#[actix_web::test]
async fn test_missing_fields_are_reported_in_order() {
  let t = TestApp::new();
  let cases = [
    (json!({}), "full_name"),
    (json!({ "user_name": "dunder", "password": "Sup3rSecret" }), "full_name"),
    (json!({ "full_name": "Dunder Mifflin", "password": "Sup3rSecret" }), "user_name"),
    (json!({ "full_name": "Dunder Mifflin", "user_name": "dunder" }), "password"),
    (
      json!({ "full_name": "Dunder Mifflin", "user_name": "dunder", "password": "" }),
      "password",
    ),
    (
      json!({ "full_name": "Dunder Mifflin", "user_name": null, "password": "Sup3rSecret" }),
      "user_name",
    ),
  ];

  for (body, field) in cases {
    let (status, _, body) = register(&t, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      body,
      json!({ "error": format!("Missing '{field}' in request body") })
    );
  }
}

#[actix_web::test]
async fn test_weak_passwords_are_rejected() {
  let t = TestApp::new();
  let too_long = format!("Aa1{}", "a".repeat(70));
  let cases = [
    ("Sh0rt", "Password must be longer than 8 characters"),
    (too_long.as_str(), "Password must be less than 72 characters"),
    (" Passw0rd", "Password must not start or end with empty spaces"),
    ("Passw0rd ", "Password must not start or end with empty spaces"),
    ("alllowercase1", "Password must contain 1 upper case, lower case and number"),
    ("ALLUPPERCASE1", "Password must contain 1 upper case, lower case and number"),
    ("NoNumbersHere", "Password must contain 1 upper case, lower case and number"),
  ];

  for (password, message) in cases {
    let (status, _, body) = register(
      &t,
      json!({ "full_name": "Dunder Mifflin", "user_name": "dunder", "password": password }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{password:?}");
    assert_eq!(body, json!({ "error": message }), "{password:?}");
  }

  assert!(!t.store.has_user_with_name("dunder").await.unwrap());
}

#[actix_web::test]
async fn test_register_user() {
  let t = TestApp::new();
  let (status, location, body) = register(
    &t,
    json!({ "full_name": "Dunder Mifflin", "user_name": "dunder", "password": "Sup3rSecret" }),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(location.as_deref(), Some("/api/users/1"));
  assert_eq!(body["id"], json!(1));
  assert_eq!(body["user_name"], json!("dunder"));
  assert_eq!(body["full_name"], json!("Dunder Mifflin"));
  assert_eq!(body["nickname"], json!(""));
  assert!(body["date_created"].is_string());
  assert!(body.get("password").is_none());
  assert!(body.get("password_hash").is_none());

  let stored = t.store.find_user_by_name("dunder").await.unwrap().unwrap();
  assert_ne!(stored.password_hash, "Sup3rSecret");
  assert!(
    password::verify(Sensitive::new("Sup3rSecret".into()), stored.password_hash)
      .await
      .unwrap()
  );
}

#[actix_web::test]
async fn test_register_keeps_nickname() {
  let t = TestApp::new();
  let (status, location, body) = register(
    &t,
    json!({
      "full_name": "Dunder Mifflin",
      "user_name": "dunder",
      "password": "Sup3rSecret",
      "nickname": "dm"
    }),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert!(location.unwrap().ends_with(&format!("/{}", body["id"])));
  assert_eq!(body["nickname"], json!("dm"));
}

#[actix_web::test]
async fn test_duplicate_user_name() {
  let t = TestApp::new();
  let body = json!({ "full_name": "Dunder Mifflin", "user_name": "dunder", "password": "Sup3rSecret" });

  let (status, ..) = register(&t, body.clone()).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, location, body) = register(&t, body).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(location.is_none());
  assert_eq!(body, json!({ "error": "Username already taken" }));
}

#[actix_web::test]
async fn test_user_names_are_case_sensitive() {
  let t = TestApp::new();
  t.seed_user("dunder").await;

  let (status, location, _) = register(
    &t,
    json!({ "full_name": "Dunder Mifflin", "user_name": "Dunder", "password": "Sup3rSecret" }),
  )
  .await;

  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(location.as_deref(), Some("/api/users/2"));
}

#[actix_web::test]
async fn test_malformed_body() {
  let t = TestApp::new();
  let service = test::init_service(App::new().configure(t.routes())).await;

  for payload in ["not json", r#""a string""#, r#"{ "user_name": 5 }"#] {
    let req = test::TestRequest::post()
      .uri("/api/users")
      .insert_header(header::ContentType::json())
      .set_payload(payload)
      .to_request();

    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{payload}");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid request body" }));
  }
}

#[actix_web::test]
async fn test_duplicate_caught_at_insert() {
  let app = quill::App::with_store(
    &config::Jwt::new(JWT_SECRET),
    Arc::new(BlindStore(MemoryStore::new())),
  );
  let service = test::init_service(App::new().configure(quill::http::configure(app))).await;
  let body = json!({ "full_name": "Dunder Mifflin", "user_name": "dunder", "password": "Sup3rSecret" });

  let req = test::TestRequest::post()
    .uri("/api/users")
    .set_json(&body)
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let req = test::TestRequest::post()
    .uri("/api/users")
    .set_json(&body)
    .to_request();
  let resp = test::call_service(&service, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "error": "Username already taken" }));
}

#[actix_web::test]
async fn test_password_limit_counts_bytes() {
  let t = TestApp::new();
  let wide = format!("Aa1{}", "é".repeat(69));
  let (status, location, body) = register(
    &t,
    json!({ "full_name": "Dunder Mifflin", "user_name": "dunder", "password": wide }),
  )
  .await;

  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(location.is_none());
  assert_eq!(body, json!({ "error": "Password must be less than 72 characters" }));
  assert!(!t.store.has_user_with_name("dunder").await.unwrap());
}
