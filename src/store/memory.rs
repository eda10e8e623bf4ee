use async_trait::async_trait;
use chrono::Utc;
use error_stack::Report;
use tokio::sync::RwLock;

use super::{ArticleStore, UserStore};
use crate::database::{Error, Result};
use crate::schema::{
  Article, ArticleView, Comment, CommentView, NewArticle, NewComment, NewUser, PublicUser, User,
};
use crate::types::id::{
  marker::{ArticleMarker, Marker, UserMarker},
  Id,
};

/// [`Store`](super::Store) that keeps every table in memory.
///
/// It mirrors the constraints of the Postgres schema (unique user
/// names, foreign keys) so handlers behave the same against both.
#[derive(Debug, Default)]
pub struct MemoryStore {
  tables: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
  users: Vec<User>,
  articles: Vec<Article>,
  comments: Vec<Comment>,
}

impl MemoryStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }
}

fn next_id<M: Marker>(len: usize) -> Id<M> {
  Id::new(len as u64 + 1)
}

impl Tables {
  fn public_user(&self, id: Id<UserMarker>) -> Option<PublicUser> {
    self.users.iter().find(|u| u.id == id).map(PublicUser::from)
  }

  fn article_view(&self, article: &Article) -> ArticleView {
    let number_of_comments = self
      .comments
      .iter()
      .filter(|c| c.article_id == article.id)
      .count();

    ArticleView {
      id: article.id,
      style: article.style,
      title: article.title.clone(),
      content: article.content.clone(),
      date_created: article.date_created,
      number_of_comments: number_of_comments as u64,
      author: article.author_id.and_then(|id| self.public_user(id)),
    }
  }

  fn comment_view(&self, comment: &Comment) -> Result<CommentView> {
    let user = self.public_user(comment.user_id).ok_or_else(|| {
      Report::new(Error::Internal(sqlx::Error::RowNotFound))
        .attach_printable(format!("comment {} has no author", comment.id))
    })?;

    Ok(CommentView {
      id: comment.id,
      text: comment.text.clone(),
      article_id: comment.article_id,
      date_created: comment.date_created,
      user,
    })
  }
}

fn foreign_key_violation(message: &'static str) -> Report<Error> {
  Report::new(Error::Internal(sqlx::Error::RowNotFound)).attach_printable(message)
}

#[async_trait]
impl UserStore for MemoryStore {
  async fn has_user_with_name(&self, user_name: &str) -> Result<bool> {
    let tables = self.tables.read().await;
    Ok(tables.users.iter().any(|u| u.user_name == user_name))
  }

  async fn find_user_by_name(&self, user_name: &str) -> Result<Option<User>> {
    let tables = self.tables.read().await;
    Ok(tables.users.iter().find(|u| u.user_name == user_name).cloned())
  }

  async fn insert_user(&self, new_user: NewUser<'_>) -> Result<User> {
    let mut tables = self.tables.write().await;
    if tables.users.iter().any(|u| u.user_name == new_user.user_name) {
      return Err(Report::new(Error::UniqueViolation)
        .attach_printable(format!("user_name {:?} already exists", new_user.user_name)));
    }

    let user = User {
      id: next_id(tables.users.len()),
      user_name: new_user.user_name.to_string(),
      full_name: new_user.full_name.to_string(),
      nickname: new_user.nickname.to_string(),
      password_hash: new_user.password_hash.to_string(),
      date_created: Utc::now(),
      date_modified: None,
    };
    tables.users.push(user.clone());
    Ok(user)
  }
}

#[async_trait]
impl ArticleStore for MemoryStore {
  async fn list_articles(&self) -> Result<Vec<ArticleView>> {
    let tables = self.tables.read().await;
    Ok(tables.articles.iter().map(|a| tables.article_view(a)).collect())
  }

  async fn find_article(&self, id: Id<ArticleMarker>) -> Result<Option<ArticleView>> {
    let tables = self.tables.read().await;
    Ok(tables
      .articles
      .iter()
      .find(|a| a.id == id)
      .map(|a| tables.article_view(a)))
  }

  async fn insert_article(&self, new_article: NewArticle<'_>) -> Result<Article> {
    let mut tables = self.tables.write().await;
    if let Some(author_id) = new_article.author_id {
      if !tables.users.iter().any(|u| u.id == author_id) {
        return Err(foreign_key_violation("article author does not exist"));
      }
    }

    let article = Article {
      id: next_id(tables.articles.len()),
      title: new_article.title.to_string(),
      content: new_article.content.to_string(),
      style: new_article.style,
      date_created: Utc::now(),
      author_id: new_article.author_id,
    };
    tables.articles.push(article.clone());
    Ok(article)
  }

  async fn list_comments(&self, article_id: Id<ArticleMarker>) -> Result<Vec<CommentView>> {
    let tables = self.tables.read().await;
    tables
      .comments
      .iter()
      .filter(|c| c.article_id == article_id)
      .map(|c| tables.comment_view(c))
      .collect()
  }

  async fn insert_comment(&self, new_comment: NewComment<'_>) -> Result<CommentView> {
    let mut tables = self.tables.write().await;
    if !tables.articles.iter().any(|a| a.id == new_comment.article_id) {
      return Err(foreign_key_violation("commented article does not exist"));
    }

    if !tables.users.iter().any(|u| u.id == new_comment.user_id) {
      return Err(foreign_key_violation("comment author does not exist"));
    }

    let comment = Comment {
      id: next_id(tables.comments.len()),
      text: new_comment.text.to_string(),
      date_created: Utc::now(),
      article_id: new_comment.article_id,
      user_id: new_comment.user_id,
    };
    tables.comments.push(comment.clone());
    tables.comment_view(&comment)
  }
}
