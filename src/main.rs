use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};
use authoring_backend::{
    config::{get_config, init_config},
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new();

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .route(
            "/api/questions/generate",
            post(routes::questions::generate_questions),
        )
        .route(
            "/api/questions",
            get(routes::questions::list_saved_questions).post(routes::questions::save_questions),
        )
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let authoring_api = Router::new()
        .route("/api/auth/validate", get(routes::auth::validate))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route(
            "/api/templates",
            get(routes::templates::list_templates).post(routes::templates::create_template),
        )
        .route(
            "/api/templates/examples",
            get(routes::templates::example_templates),
        )
        .route(
            "/api/templates/export",
            get(routes::templates::export_templates),
        )
        .route(
            "/api/templates/import",
            post(routes::templates::import_templates),
        )
        .route(
            "/api/templates/:id",
            get(routes::templates::get_template)
                .put(routes::templates::update_template)
                .delete(routes::templates::delete_template),
        )
        .route(
            "/api/contents",
            get(routes::contents::list_contents).post(routes::contents::create_content),
        )
        .route(
            "/api/contents/:id",
            get(routes::contents::get_content)
                .put(routes::contents::update_content)
                .delete(routes::contents::delete_content),
        )
        .route(
            "/api/assessments",
            get(routes::assessments::list_assessments)
                .post(routes::assessments::create_assessment),
        )
        .route(
            "/api/assessments/:id",
            get(routes::assessments::get_assessment)
                .put(routes::assessments::update_assessment)
                .delete(routes::assessments::delete_assessment),
        )
        .route("/api/editor/drafts", post(routes::editor::open_draft))
        .route(
            "/api/editor/drafts/:id",
            get(routes::editor::get_draft).delete(routes::editor::discard_draft),
        )
        .route(
            "/api/editor/drafts/:id/details",
            patch(routes::editor::update_draft_details),
        )
        .route(
            "/api/editor/drafts/:id/type",
            post(routes::editor::set_draft_type),
        )
        .route(
            "/api/editor/drafts/:id/test-cases",
            post(routes::editor::add_test_case).put(routes::editor::replace_test_cases),
        )
        .route(
            "/api/editor/drafts/:id/test-cases/:index",
            patch(routes::editor::edit_test_case).delete(routes::editor::delete_test_case),
        )
        .route(
            "/api/editor/drafts/:id/options",
            post(routes::editor::add_option),
        )
        .route(
            "/api/editor/drafts/:id/options/:option_id",
            patch(routes::editor::edit_option).delete(routes::editor::remove_option),
        )
        .route(
            "/api/editor/drafts/:id/images/:slot",
            post(routes::editor::upload_image),
        )
        .route(
            "/api/editor/drafts/:id/images/:slot/:index",
            delete(routes::editor::remove_image),
        )
        .route(
            "/api/editor/drafts/:id/validate",
            post(routes::editor::validate_draft),
        )
        .route(
            "/api/editor/drafts/:id/commit",
            post(routes::editor::commit_draft),
        )
        .layer(axum::middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.integration_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(authoring_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
