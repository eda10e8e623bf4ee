use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{marker::UserMarker, Id},
};

#[derive(Clone, FromRow, PartialEq, Eq)]
pub struct User {
  pub id: Id<UserMarker>,
  pub user_name: String,
  pub full_name: String,
  pub nickname: String,
  pub password_hash: String,
  pub date_created: DateTime<Utc>,
  pub date_modified: Option<DateTime<Utc>>,
}

/// Columns supplied by the caller when registering a user. The
/// identifier and creation date are assigned by the store.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
  pub user_name: &'a str,
  pub full_name: &'a str,
  pub nickname: &'a str,
  pub password_hash: &'a str,
}

/// The subset of [`User`] that is safe to show to anyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
  pub id: Id<UserMarker>,
  pub user_name: String,
  pub full_name: String,
  pub nickname: String,
  pub date_created: DateTime<Utc>,
}

impl From<&User> for PublicUser {
  fn from(user: &User) -> Self {
    Self {
      id: user.id,
      user_name: user.user_name.clone(),
      full_name: user.full_name.clone(),
      nickname: user.nickname.clone(),
      date_created: user.date_created,
    }
  }
}

impl std::fmt::Debug for User {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("User")
      .field("id", &self.id)
      .field("user_name", &self.user_name)
      .field("date_created", &self.date_created)
      .finish_non_exhaustive()
  }
}

impl User {
  #[tracing::instrument(skip(conn))]
  pub async fn by_name(conn: &mut Connection, user_name: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "quill_users" WHERE user_name = $1"#)
      .bind(user_name)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn name_exists(conn: &mut Connection, user_name: &str) -> Result<bool> {
    sqlx::query_scalar::<_, bool>(
      r#"SELECT EXISTS (SELECT 1 FROM "quill_users" WHERE user_name = $1)"#,
    )
    .bind(user_name)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn, new_user), fields(user_name = %new_user.user_name))]
  pub async fn insert(conn: &mut Connection, new_user: NewUser<'_>) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "quill_users" (user_name, full_name, nickname, password_hash)
         VALUES ($1, $2, $3, $4)
         RETURNING *"#,
    )
    .bind(new_user.user_name)
    .bind(new_user.full_name)
    .bind(new_user.nickname)
    .bind(new_user.password_hash)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}
