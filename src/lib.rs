// Library crate for TaskFlow
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    add_member, create_comment, create_project, create_task, delete_project, delete_task,
    get_project, get_task, health_check, health_check_db, list_comments, list_projects, list_tasks,
    login, me, register, update_project, update_task, update_task_status,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        // Auth routes
        .route("/api/v1/auth/me", get(me))
        // Project routes
        .route("/api/v1/projects", post(create_project))
        .route("/api/v1/projects", get(list_projects))
        .route("/api/v1/projects/{id}", get(get_project))
        .route("/api/v1/projects/{id}", put(update_project))
        .route("/api/v1/projects/{id}", delete(delete_project))
        .route("/api/v1/projects/{id}/members", post(add_member))
        // Task routes (nested under projects)
        .route("/api/v1/projects/{project_id}/tasks", post(create_task))
        .route("/api/v1/projects/{project_id}/tasks", get(list_tasks))
        .route("/api/v1/projects/{project_id}/tasks/{task_id}", get(get_task))
        .route(
            "/api/v1/projects/{project_id}/tasks/{task_id}",
            put(update_task),
        )
        .route(
            "/api/v1/projects/{project_id}/tasks/{task_id}",
            delete(delete_task),
        )
        .route(
            "/api/v1/projects/{project_id}/tasks/{task_id}/status",
            patch(update_task_status),
        )
        // Comment routes (nested under tasks)
        .route(
            "/api/v1/projects/{project_id}/tasks/{task_id}/comments",
            post(create_comment),
        )
        .route(
            "/api/v1/projects/{project_id}/tasks/{task_id}/comments",
            get(list_comments),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors_origins: Vec<HeaderValue> = state
        .config
        .cors_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cors_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(|| async { "TaskFlow API" }))
        // Public auth routes
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        // Health routes
        .route("/api/v1/health", get(health_check))
        .route("/api/v1/health/db", get(health_check_db))
        // Protected routes
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
