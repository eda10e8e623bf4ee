use actix_web::{middleware::from_fn, web};

use super::auth::require_user;

pub mod articles;
pub mod auth;
pub mod comments;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .service(web::scope("/api/auth").route("/login", web::post().to(auth::login)))
    .service(
      web::scope("/api/users")
        .route("", web::post().to(users::register))
        .route("/", web::post().to(users::register)),
    )
    .service(
      web::scope("/api/articles")
        .route("", web::get().to(articles::list))
        .service(
          web::scope("/{article_id}")
            .wrap(from_fn(require_user))
            .route("", web::get().to(articles::get))
            .route("/comments", web::get().to(articles::comments)),
        ),
    )
    .service(
      web::scope("/api/comments")
        .wrap(from_fn(require_user))
        .route("", web::post().to(comments::create)),
    );
}
