use axum::{
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod sort;

use database::Database;

/// Process-wide handles threaded into request handlers via router state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

pub fn app(state: AppState) -> Router {
    use handlers::{dashboard, login as login_handlers, pages, surat, users};

    Router::new()
        // Pages behind the route guard
        .route("/login", get(pages::login_page))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/surat", get(pages::surat_page))
        .route("/admin", get(pages::admin_page))
        .route("/admin/users", get(pages::admin_users_page))
        // API surface (guard-exempt; handlers check the session themselves)
        .route("/api/health", get(handlers::health))
        .route("/api/login", post(login_handlers::login))
        .route("/api/logout", post(login_handlers::logout))
        .route("/api/surat", get(surat::list).post(surat::create))
        .route("/api/surat/:id", get(surat::detail).delete(surat::remove))
        .route(
            "/api/surat/:id/lampiran",
            get(surat::lampiran_list).post(surat::lampiran_add),
        )
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/:id", delete(users::remove))
        .route("/api/users/:id/role", put(users::update_role))
        .route("/api/users/:id/restore", post(users::restore))
        // Global middleware
        .layer(from_fn(middleware::route_guard))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
