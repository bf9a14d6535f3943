pub mod handlers;
pub mod store;
pub mod types;

use crate::{
    Result,
    config::Config,
    llm::{GeminiClient, LlmClient},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use store::SessionStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:id",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route(
            "/sessions/:id/image",
            put(handlers::upload_image).get(handlers::get_image),
        )
        .route("/sessions/:id/keyword", put(handlers::set_keyword))
        .route("/sessions/:id/generate", post(handlers::generate))
        .route(
            "/sessions/:id/suggestions/select",
            post(handlers::select_suggestion),
        )
        .route("/sessions/:id/reset", post(handlers::reset))
        .route("/sessions/:id/error", delete(handlers::dismiss_error))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Initialize the remote client shared by every session
    let client: Arc<dyn LlmClient> = Arc::new(GeminiClient::new(config.llm.clone()));

    // Initialize session storage
    let store = SessionStore::new(
        client,
        config.llm.clone(),
        chrono::Duration::minutes(config.server.session_idle_minutes),
    );

    // Create application state
    let app_state = AppState {
        store: Arc::new(store),
    };

    // Create router
    let app = router(app_state, config.server.max_upload_bytes);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!(
        "Starting server on {} (image model: {}, text model: {})",
        addr, config.llm.image_model, config.llm.text_model
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
