pub mod request_id;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use crate::controllers::{
    edit::EditController, health, pronunciation::PronunciationController,
    recommend::RecommendController, scenario::ScenarioController, thread::ThreadController,
    tts::TtsController, user::UserController,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::UserRepository;

/// Every controller the router dispatches to
pub struct Controllers {
    pub thread: Arc<ThreadController>,
    pub recommend: Arc<RecommendController>,
    pub edit: Arc<EditController>,
    pub tts: Arc<TtsController>,
    pub pronunciation: Arc<PronunciationController>,
    pub scenario: Arc<ScenarioController>,
    pub user: Arc<UserController>,
}

/// Build the application router with all routes and layers
pub fn create_router(user_repo: Arc<dyn UserRepository>, controllers: Controllers) -> Router {
    let thread_routes = Router::new()
        .route("/api/thread", post(ThreadController::advance))
        .route("/api/thread/:threadId", get(ThreadController::history))
        .with_state(controllers.thread);

    let recommend_routes = Router::new()
        .route("/api/recommend", post(RecommendController::recommend))
        .with_state(controllers.recommend);

    let edit_routes = Router::new()
        .route("/api/edit", post(EditController::edit))
        .with_state(controllers.edit);

    let tts_routes = Router::new()
        .route("/api/tts", post(TtsController::synthesize))
        .with_state(controllers.tts);

    let pronunciation_routes = Router::new()
        .route("/api/pronunciation", post(PronunciationController::assess))
        .with_state(controllers.pronunciation);

    let scenario_routes = Router::new()
        .route("/api/scenario", post(ScenarioController::generate))
        .with_state(controllers.scenario);

    let user_routes = Router::new()
        .route("/api/users", post(UserController::upsert))
        .route("/api/users/:tgId", get(UserController::get_by_tg_id))
        .with_state(controllers.user);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(user_repo)
        .merge(thread_routes)
        .merge(recommend_routes)
        .merge(edit_routes)
        .merge(tts_routes)
        .merge(pronunciation_routes)
        .merge(scenario_routes)
        .merge(user_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve `app` until shutdown
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
