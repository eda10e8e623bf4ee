mod article;
mod comment;
mod user;

pub use article::{Article, ArticleStyle, ArticleView, NewArticle};
pub use comment::{Comment, CommentView, NewComment};
pub use user::{NewUser, PublicUser, User};
