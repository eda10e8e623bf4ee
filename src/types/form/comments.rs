use serde::Deserialize;

use super::required;
use crate::types::id::{marker::ArticleMarker, Id};
use crate::types::Error;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Request {
  pub article_id: Option<Id<ArticleMarker>>,
  pub text: Option<String>,
}

#[derive(Debug)]
pub struct ValidComment {
  pub article_id: Id<ArticleMarker>,
  pub text: String,
}

impl Request {
  pub fn validate(self) -> Result<ValidComment, Error> {
    let article_id = self.article_id.ok_or(Error::MissingField("article_id"))?;
    let text = required("text", self.text)?;
    Ok(ValidComment { article_id, text })
  }
}
