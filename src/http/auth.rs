use actix_web::{
  body::{EitherBody, MessageBody},
  dev::{ServiceRequest, ServiceResponse},
  http::header,
  middleware::Next,
  web, HttpMessage,
};
use thiserror::Error;

use super::{Actor, Error};
use crate::{types, App};

#[derive(Debug, Error)]
#[error("No bearer token in the Authorization header")]
struct MissingToken;

#[derive(Debug, Error)]
#[error("Token subject does not belong to any user")]
struct UnknownSubject;

#[derive(Debug, Error)]
#[error("web::Data<App> is not registered")]
struct MissingApp;

/// Extracts the token from an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
pub fn bearer_token(value: &str) -> Option<&str> {
  let (scheme, token) = (value.get(..7)?, value.get(7..)?);
  if !scheme.eq_ignore_ascii_case("bearer ") {
    return None;
  }

  let token = token.trim();
  (!token.is_empty()).then_some(token)
}

/// Middleware for protected scopes. It runs before any extractor of
/// the wrapped handlers, so unauthorized requests never get their body
/// parsed.
pub async fn require_user<B: MessageBody>(
  req: ServiceRequest,
  next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, actix_web::Error> {
  let result = authenticate(&req).await;
  match result {
    Ok(actor) => {
      req.extensions_mut().insert(actor);
      next.call(req).await.map(ServiceResponse::map_into_left_body)
    }
    Err(error) => Ok(req.error_response(error).map_into_right_body()),
  }
}

#[tracing::instrument(skip_all, name = "http.authenticate")]
async fn authenticate(req: &ServiceRequest) -> Result<Actor, Error> {
  let Some(app) = req.app_data::<web::Data<App>>() else {
    return Err(Error::from_context(types::Error::Internal, MissingApp));
  };

  let token = req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .and_then(bearer_token)
    .ok_or_else(|| Error::from_context(types::Error::AuthMissing, MissingToken))?;

  let claims = app
    .jwt
    .decode(token)
    .map_err(|e| Error::from_report(types::Error::AuthInvalid, e))?;

  match app.store.find_user_by_name(&claims.sub).await? {
    Some(user) => Ok(Actor(user)),
    None => Err(
      Error::from_context(types::Error::AuthInvalid, UnknownSubject)
        .attach_printable(format!("subject: {:?}", claims.sub)),
    ),
  }
}
