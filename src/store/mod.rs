//! Persistence seam between the HTTP handlers and the database.
//!
//! Handlers only ever see `dyn Store`, which lets the same routes run
//! against Postgres in production and against [`MemoryStore`] in tests.
use async_trait::async_trait;

use crate::database::Result;
use crate::schema::{
  Article, ArticleView, CommentView, NewArticle, NewComment, NewUser, User,
};
use crate::types::id::{marker::ArticleMarker, Id};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
  /// Whether a user with exactly this (case-sensitive) name exists.
  async fn has_user_with_name(&self, user_name: &str) -> Result<bool>;

  async fn find_user_by_name(&self, user_name: &str) -> Result<Option<User>>;

  /// Stores a new user, assigning its id and creation date.
  ///
  /// Fails with [`UniqueViolation`] if the name was taken in the
  /// meantime.
  ///
  /// [`UniqueViolation`]: crate::database::Error::UniqueViolation
  async fn insert_user(&self, new_user: NewUser<'_>) -> Result<User>;
}

#[async_trait]
pub trait ArticleStore: Send + Sync {
  async fn list_articles(&self) -> Result<Vec<ArticleView>>;

  async fn find_article(&self, id: Id<ArticleMarker>) -> Result<Option<ArticleView>>;

  async fn insert_article(&self, new_article: NewArticle<'_>) -> Result<Article>;

  async fn list_comments(&self, article_id: Id<ArticleMarker>) -> Result<Vec<CommentView>>;

  async fn insert_comment(&self, new_comment: NewComment<'_>) -> Result<CommentView>;
}

pub trait Store: UserStore + ArticleStore {}

impl<T: UserStore + ArticleStore> Store for T {}
