use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::PublicUser;
use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{ArticleMarker, UserMarker},
    Id,
  },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, sqlx::Type)]
#[sqlx(type_name = "article_style")]
pub enum ArticleStyle {
  Listicle,
  #[serde(rename = "How-to")]
  #[sqlx(rename = "How-to")]
  HowTo,
  News,
  Interview,
  Story,
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Article {
  pub id: Id<ArticleMarker>,
  pub title: String,
  pub content: String,
  pub style: ArticleStyle,
  pub date_created: DateTime<Utc>,
  pub author_id: Option<Id<UserMarker>>,
}

#[derive(Debug, Clone, Copy)]
pub struct NewArticle<'a> {
  pub title: &'a str,
  pub content: &'a str,
  pub style: ArticleStyle,
  pub author_id: Option<Id<UserMarker>>,
}

/// An article as it is served to clients, with its author and
/// how many comments it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleView {
  pub id: Id<ArticleMarker>,
  pub style: ArticleStyle,
  pub title: String,
  pub content: String,
  pub date_created: DateTime<Utc>,
  pub number_of_comments: u64,
  pub author: Option<PublicUser>,
}

#[derive(FromRow)]
struct ArticleRow {
  id: Id<ArticleMarker>,
  style: ArticleStyle,
  title: String,
  content: String,
  date_created: DateTime<Utc>,
  number_of_comments: i64,
  author_id: Option<Id<UserMarker>>,
  author_user_name: Option<String>,
  author_full_name: Option<String>,
  author_nickname: Option<String>,
  author_date_created: Option<DateTime<Utc>>,
}

impl From<ArticleRow> for ArticleView {
  fn from(row: ArticleRow) -> Self {
    let author = match (
      row.author_id,
      row.author_user_name,
      row.author_full_name,
      row.author_nickname,
      row.author_date_created,
    ) {
      (Some(id), Some(user_name), Some(full_name), Some(nickname), Some(date_created)) => {
        Some(PublicUser {
          id,
          user_name,
          full_name,
          nickname,
          date_created,
        })
      }
      _ => None,
    };

    Self {
      id: row.id,
      style: row.style,
      title: row.title,
      content: row.content,
      date_created: row.date_created,
      number_of_comments: u64::try_from(row.number_of_comments).unwrap_or_default(),
      author,
    }
  }
}

impl Article {
  #[tracing::instrument(skip(conn))]
  pub async fn list_views(conn: &mut Connection) -> Result<Vec<ArticleView>> {
    let rows = sqlx::query_as::<_, ArticleRow>(
      r#"SELECT a.id, a.style, a.title, a.content, a.date_created,
                COUNT(c.id) AS number_of_comments,
                u.id AS author_id,
                u.user_name AS author_user_name,
                u.full_name AS author_full_name,
                u.nickname AS author_nickname,
                u.date_created AS author_date_created
         FROM "quill_articles" a
         LEFT JOIN "quill_comments" c ON c.article_id = a.id
         LEFT JOIN "quill_users" u ON u.id = a.author_id
         GROUP BY a.id, u.id
         ORDER BY a.id"#,
    )
    .fetch_all(conn)
    .await
    .into_db_error()?;

    Ok(rows.into_iter().map(ArticleView::from).collect())
  }

  #[tracing::instrument(skip(conn))]
  pub async fn view_by_id(
    conn: &mut Connection,
    id: Id<ArticleMarker>,
  ) -> Result<Option<ArticleView>> {
    let row = sqlx::query_as::<_, ArticleRow>(
      r#"SELECT a.id, a.style, a.title, a.content, a.date_created,
                COUNT(c.id) AS number_of_comments,
                u.id AS author_id,
                u.user_name AS author_user_name,
                u.full_name AS author_full_name,
                u.nickname AS author_nickname,
                u.date_created AS author_date_created
         FROM "quill_articles" a
         LEFT JOIN "quill_comments" c ON c.article_id = a.id
         LEFT JOIN "quill_users" u ON u.id = a.author_id
         WHERE a.id = $1
         GROUP BY a.id, u.id"#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
    .into_db_error()?;

    Ok(row.map(ArticleView::from))
  }

  #[tracing::instrument(skip(conn, new_article), fields(title = %new_article.title))]
  pub async fn insert(conn: &mut Connection, new_article: NewArticle<'_>) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "quill_articles" (title, content, style, author_id)
         VALUES ($1, $2, $3, $4)
         RETURNING *"#,
    )
    .bind(new_article.title)
    .bind(new_article.content)
    .bind(new_article.style)
    .bind(new_article.author_id)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::Token;

  #[test]
  fn test_style_names() {
    serde_test::assert_tokens(
      &ArticleStyle::HowTo,
      &[Token::UnitVariant { name: "ArticleStyle", variant: "How-to" }],
    );
    serde_test::assert_tokens(
      &ArticleStyle::Story,
      &[Token::UnitVariant { name: "ArticleStyle", variant: "Story" }],
    );
  }
}
