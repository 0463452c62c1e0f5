//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod health;
mod posts;
mod presenters;
mod syndication;
mod widgets;

use std::sync::Arc;

use actix_web::web;

use chronicle_core::ports::RateLimiter;

use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes. The rate limiter guards the public
/// write endpoints (comments and share-by-email).
pub fn configure_routes(cfg: &mut web::ServiceConfig, limiter: Arc<dyn RateLimiter>) {
    cfg.route("/feed.xml", web::get().to(syndication::feed))
        .route("/sitemap.xml", web::get().to(syndication::sitemap))
        // Public blog surface
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list))
                .route("/search", web::get().to(posts::search))
                .route("/tag/{tag_slug}", web::get().to(posts::list_by_tag))
                .route(
                    "/{year}/{month}/{day}/{slug}",
                    web::get().to(posts::detail),
                )
                .service(
                    web::resource("/{id}/comments")
                        .wrap(RateLimitMiddleware::new(limiter.clone()))
                        .route(web::post().to(posts::submit_comment)),
                )
                .service(
                    web::resource("/{id}/share")
                        .wrap(RateLimitMiddleware::new(limiter))
                        .route(web::post().to(posts::share)),
                ),
        )
        // Sidebar aggregates
        .service(
            web::scope("/widgets")
                .route("/summary", web::get().to(widgets::summary))
                .route("/latest", web::get().to(widgets::latest))
                .route("/most-commented", web::get().to(widgets::most_commented)),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(health::health_check))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login))
                        .route("/me", web::get().to(auth::me)),
                )
                // Admin routes - token gated via the Identity extractor
                .service(
                    web::scope("/admin")
                        .route("/posts", web::get().to(admin::list_posts))
                        .route("/posts", web::post().to(admin::create_post))
                        .route("/posts/{id}", web::get().to(admin::get_post))
                        .route("/posts/{id}", web::put().to(admin::update_post))
                        .route("/posts/{id}", web::delete().to(admin::delete_post))
                        .route(
                            "/posts/{id}/comments",
                            web::get().to(admin::list_post_comments),
                        )
                        .route("/comments/{id}", web::patch().to(admin::moderate_comment)),
                ),
        );
}
