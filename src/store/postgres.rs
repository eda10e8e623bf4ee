use async_trait::async_trait;
use error_stack::Report;

use super::{ArticleStore, UserStore};
use crate::database::{Error, Pool, Result};
use crate::schema::{
  Article, ArticleView, Comment, CommentView, NewArticle, NewComment, NewUser, User,
};
use crate::types::id::{marker::ArticleMarker, Id};

/// [`Store`](super::Store) backed by the Postgres pool.
#[derive(Debug, Clone)]
pub struct PgStore {
  pool: Pool,
}

impl PgStore {
  #[must_use]
  pub fn new(pool: Pool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl UserStore for PgStore {
  async fn has_user_with_name(&self, user_name: &str) -> Result<bool> {
    let mut conn = self.pool.get().await?;
    User::name_exists(&mut conn, user_name).await
  }

  async fn find_user_by_name(&self, user_name: &str) -> Result<Option<User>> {
    let mut conn = self.pool.get().await?;
    User::by_name(&mut conn, user_name).await
  }

  async fn insert_user(&self, new_user: NewUser<'_>) -> Result<User> {
    let mut conn = self.pool.get().await?;
    User::insert(&mut conn, new_user).await
  }
}

#[async_trait]
impl ArticleStore for PgStore {
  async fn list_articles(&self) -> Result<Vec<ArticleView>> {
    let mut conn = self.pool.get().await?;
    Article::list_views(&mut conn).await
  }

  async fn find_article(&self, id: Id<ArticleMarker>) -> Result<Option<ArticleView>> {
    let mut conn = self.pool.get().await?;
    Article::view_by_id(&mut conn, id).await
  }

  async fn insert_article(&self, new_article: NewArticle<'_>) -> Result<Article> {
    let mut conn = self.pool.get().await?;
    Article::insert(&mut conn, new_article).await
  }

  async fn list_comments(&self, article_id: Id<ArticleMarker>) -> Result<Vec<CommentView>> {
    let mut conn = self.pool.get().await?;
    Comment::views_for_article(&mut conn, article_id).await
  }

  async fn insert_comment(&self, new_comment: NewComment<'_>) -> Result<CommentView> {
    let mut conn = self.pool.get().await?;
    let comment = Comment::insert(&mut conn, new_comment).await?;
    Comment::view_by_id(&mut conn, comment.id)
      .await?
      .ok_or_else(|| {
        Report::new(Error::Internal(sqlx::Error::RowNotFound))
          .attach_printable("inserted comment vanished before it could be read back")
      })
  }
}
