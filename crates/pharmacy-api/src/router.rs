//! Route definitions for the pharmacy console HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::Router;
use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

use pharmacy_auth::guard::Requirement;
use pharmacy_entity::permission::{Action, Resource};

use crate::handlers;
use crate::middleware;
use crate::middleware::guard::guarded;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(navigation_routes(&state))
        .merge(admin_routes(&state))
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Login, who-am-I, logout
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Menu for the signed-in user
fn navigation_routes(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/navigation",
        guarded(
            state,
            Requirement::none(),
            get(handlers::navigation::navigation),
        ),
    )
}

/// Staff management, one capability per operation
fn admin_routes(state: &AppState) -> Router<AppState> {
    let users = |action: Action| Requirement::one(Resource::Users.capability(action));

    Router::new()
        .route(
            "/admin/users",
            guarded(
                state,
                users(Action::Read),
                get(handlers::admin::users::list_users),
            )
            .merge(guarded(
                state,
                users(Action::Write),
                post(handlers::admin::users::create_user),
            )),
        )
        .route(
            "/admin/users/{id}/access",
            guarded(
                state,
                users(Action::Manage),
                put(handlers::admin::users::update_access),
            ),
        )
        .route(
            "/admin/users/{id}",
            guarded(
                state,
                users(Action::Delete),
                delete(handlers::admin::users::deactivate_user),
            ),
        )
}

/// Health check (public)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
