// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    handlers::{category, session, stats},
    models::{
        category::QuizCategory,
        question::Question,
        session::{CreateSessionRequest, QuizSession, UpdateSessionRequest},
        stats::QuizStats,
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        category::list_categories,
        category::get_category,
        category::list_questions,
        session::create_session,
        session::get_session,
        session::update_session,
        stats::get_stats,
    ),
    components(schemas(
        QuizCategory,
        Question,
        QuizSession,
        CreateSessionRequest,
        UpdateSessionRequest,
        QuizStats,
    )),
    tags(
        (name = "Categories", description = "Quiz categories and their questions"),
        (name = "Sessions", description = "Quiz attempts"),
        (name = "Statistics", description = "Aggregates over completed sessions")
    )
)]
pub struct ApiDoc;

/// Assembles the main application router.
///
/// * Mounts category, session and stats routes under `/api`.
/// * Serves Swagger UI at `/swagger-ui`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE]);

    let category_routes = Router::new()
        .route("/", get(category::list_categories))
        .route("/{id}", get(category::get_category))
        .route("/{id}/questions", get(category::list_questions));

    let session_routes = Router::new()
        .route("/", post(session::create_session))
        .route(
            "/{id}",
            get(session::get_session).patch(session::update_session),
        );

    Router::new()
        .nest("/api/categories", category_routes)
        .nest("/api/sessions", session_routes)
        .route("/api/stats", get(stats::get_stats))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
