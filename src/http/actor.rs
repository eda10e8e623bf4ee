use actix_web::{FromRequest, HttpMessage};
use futures::future::{ready, Ready};
use thiserror::Error;

use super::Error;
use crate::{schema::User, types};

/// The user who sent the request, as resolved by the
/// [`require_user`](super::auth::require_user) middleware.
#[derive(Debug, Clone)]
pub struct Actor(pub User);

impl Actor {
  #[must_use]
  pub fn into_user(self) -> User {
    self.0
  }
}

impl FromRequest for Actor {
  type Error = Error;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(
    req: &actix_web::HttpRequest,
    _payload: &mut actix_web::dev::Payload,
  ) -> Self::Future {
    #[derive(Debug, Error)]
    #[error("Route is not guarded by the require_user middleware")]
    struct Unguarded;

    let actor = req.extensions().get::<Actor>().cloned();
    ready(actor.ok_or_else(|| Error::from_context(types::Error::AuthMissing, Unguarded)))
  }
}
