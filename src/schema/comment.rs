use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::PublicUser;
use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{ArticleMarker, CommentMarker, UserMarker},
    Id,
  },
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Comment {
  pub id: Id<CommentMarker>,
  pub text: String,
  pub date_created: DateTime<Utc>,
  pub article_id: Id<ArticleMarker>,
  pub user_id: Id<UserMarker>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewComment<'a> {
  pub text: &'a str,
  pub article_id: Id<ArticleMarker>,
  pub user_id: Id<UserMarker>,
}

/// A comment as it is served to clients, with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
  pub id: Id<CommentMarker>,
  pub text: String,
  pub article_id: Id<ArticleMarker>,
  pub date_created: DateTime<Utc>,
  pub user: PublicUser,
}

#[derive(FromRow)]
struct CommentRow {
  id: Id<CommentMarker>,
  text: String,
  date_created: DateTime<Utc>,
  article_id: Id<ArticleMarker>,
  user_id: Id<UserMarker>,
  user_name: String,
  full_name: String,
  nickname: String,
  user_date_created: DateTime<Utc>,
}

impl From<CommentRow> for CommentView {
  fn from(row: CommentRow) -> Self {
    Self {
      id: row.id,
      text: row.text,
      article_id: row.article_id,
      date_created: row.date_created,
      user: PublicUser {
        id: row.user_id,
        user_name: row.user_name,
        full_name: row.full_name,
        nickname: row.nickname,
        date_created: row.user_date_created,
      },
    }
  }
}

impl Comment {
  #[tracing::instrument(skip(conn))]
  pub async fn views_for_article(
    conn: &mut Connection,
    article_id: Id<ArticleMarker>,
  ) -> Result<Vec<CommentView>> {
    let rows = sqlx::query_as::<_, CommentRow>(
      r#"SELECT c.id, c.text, c.date_created, c.article_id,
                u.id AS user_id, u.user_name, u.full_name, u.nickname,
                u.date_created AS user_date_created
         FROM "quill_comments" c
         JOIN "quill_users" u ON u.id = c.user_id
         WHERE c.article_id = $1
         ORDER BY c.id"#,
    )
    .bind(article_id)
    .fetch_all(conn)
    .await
    .into_db_error()?;

    Ok(rows.into_iter().map(CommentView::from).collect())
  }

  #[tracing::instrument(skip(conn))]
  pub async fn view_by_id(
    conn: &mut Connection,
    id: Id<CommentMarker>,
  ) -> Result<Option<CommentView>> {
    let row = sqlx::query_as::<_, CommentRow>(
      r#"SELECT c.id, c.text, c.date_created, c.article_id,
                u.id AS user_id, u.user_name, u.full_name, u.nickname,
                u.date_created AS user_date_created
         FROM "quill_comments" c
         JOIN "quill_users" u ON u.id = c.user_id
         WHERE c.id = $1"#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .into_db_error()?;

    Ok(row.map(CommentView::from))
  }

  #[tracing::instrument(skip(conn, new_comment), fields(article_id = %new_comment.article_id))]
  pub async fn insert(conn: &mut Connection, new_comment: NewComment<'_>) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "quill_comments" (text, article_id, user_id)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(new_comment.text)
    .bind(new_comment.article_id)
    .bind(new_comment.user_id)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}
