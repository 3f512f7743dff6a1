use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use taskflow::config::Config;
use taskflow::handlers::{
    AddMemberRequest, CommentResponse, CreateCommentRequest, CreateProjectRequest,
    CreateTaskRequest, HealthResponse, LoginRequest, LoginResponse, ProjectDetailResponse,
    ProjectMemberResponse, ProjectResponse, RegisterRequest, TaskResponse, TokenResponse,
    UpdateProjectRequest, UpdateTaskRequest, UpdateTaskStatusRequest,
};
use taskflow::models::{ProjectRole, TaskPriority, TaskStatus, UserResponse};
use taskflow::state::AppState;
use taskflow::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::health::health_check_db,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::project::create_project,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::project::add_member,
        handlers::task::create_task,
        handlers::task::list_tasks,
        handlers::task::get_task,
        handlers::task::update_task,
        handlers::task::update_task_status,
        handlers::task::delete_task,
        handlers::comment::create_comment,
        handlers::comment::list_comments,
    ),
    components(schemas(
        HealthResponse,
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        TokenResponse,
        UserResponse,
        CreateProjectRequest,
        UpdateProjectRequest,
        AddMemberRequest,
        ProjectResponse,
        ProjectMemberResponse,
        ProjectDetailResponse,
        ProjectRole,
        CreateTaskRequest,
        UpdateTaskRequest,
        UpdateTaskStatusRequest,
        TaskResponse,
        TaskStatus,
        TaskPriority,
        CreateCommentRequest,
        CommentResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Projects", description = "Project and membership management"),
        (name = "Tasks", description = "Task management within a project"),
        (name = "Comments", description = "Comments on tasks")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to the database, runs migrations)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await.unwrap();
}
