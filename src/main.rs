use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yapper_backend::controllers::{
    edit::EditController, pronunciation::PronunciationController, recommend::RecommendController,
    scenario::ScenarioController, thread::ThreadController, tts::TtsController,
    user::UserController,
};
use yapper_backend::domain::{
    dialogue::{AssistantPersona, DialogueService},
    editor::EditorService,
    pronunciation::PronunciationService,
    recommendation::RecommendationService,
    scenario::ScenarioService,
    tts::{AudioArtifactCache, TtsService},
    user::UserService,
};
use yapper_backend::infrastructure::config::{Config, LogFormat};
use yapper_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use yapper_backend::infrastructure::http::{create_router, start_http_server, Controllers};
use yapper_backend::infrastructure::repositories::{
    AssistantRepository, AudioStorageRepository, AzureSpeechRepository, CompletionRepository,
    OpenAiAssistantRepository, OpenAiCompletionRepository, PgScenarioRepository,
    PgUserRepository, ScenarioRepository, SpeechRepository, SupabaseAudioStorageRepository,
    UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        development = config.is_development(),
        "Starting Yapper Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool and provider clients)
    tracing::info!("Instantiating repositories...");
    let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let scenario_repo: Arc<dyn ScenarioRepository> =
        Arc::new(PgScenarioRepository::new(pool.clone()));

    let openai_client = Arc::new(OpenAIClient::with_config(
        OpenAIConfig::new().with_api_key(config.openai_api_key.clone()),
    ));
    tracing::info!(model = %config.openai_model, "OpenAI client initialized");

    let assistant_repo: Arc<dyn AssistantRepository> = Arc::new(OpenAiAssistantRepository::new(
        openai_client.clone(),
        config.openai_model.clone(),
        config.upstream_timeout(),
        config.assistant_run_timeout(),
        config.assistant_poll_interval(),
    ));
    let completion_repo: Arc<dyn CompletionRepository> = Arc::new(OpenAiCompletionRepository::new(
        openai_client,
        config.openai_model.clone(),
        config.upstream_timeout(),
    ));

    let speech_repo: Arc<dyn SpeechRepository> = Arc::new(AzureSpeechRepository::new(
        config.azure_speech_key.clone(),
        &config.azure_speech_region,
        config.upstream_timeout(),
    )?);
    tracing::info!(region = %config.azure_speech_region, "Azure Speech client initialized");

    let storage_repo: Arc<dyn AudioStorageRepository> =
        Arc::new(SupabaseAudioStorageRepository::new(
            config.supabase_url.clone(),
            config.supabase_service_role_key.clone(),
            config.audio_bucket.clone(),
            config.upstream_timeout(),
        )?);
    tracing::info!(bucket = %config.audio_bucket, "Audio storage client initialized");

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let audio_cache = config
        .audio_cache_enabled
        .then(|| Arc::new(AudioArtifactCache::new()));
    tracing::info!(enabled = audio_cache.is_some(), "Audio artifact cache");

    let dialogue_service = Arc::new(DialogueService::new(
        user_repo.clone(),
        assistant_repo,
        AssistantPersona::street_vendor(),
    ));
    let recommendation_service = Arc::new(RecommendationService::new(completion_repo.clone()));
    let editor_service = Arc::new(EditorService::new(completion_repo.clone()));
    let tts_service = Arc::new(TtsService::new(
        speech_repo.clone(),
        storage_repo,
        audio_cache,
    ));
    let pronunciation_service = Arc::new(PronunciationService::new(speech_repo));
    let scenario_service = Arc::new(ScenarioService::new(
        user_repo.clone(),
        scenario_repo,
        completion_repo,
    ));
    let user_service = Arc::new(UserService::new(user_repo.clone()));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let controllers = Controllers {
        thread: Arc::new(ThreadController::new(dialogue_service)),
        recommend: Arc::new(RecommendController::new(recommendation_service)),
        edit: Arc::new(EditController::new(editor_service)),
        tts: Arc::new(TtsController::new(tts_service)),
        pronunciation: Arc::new(PronunciationController::new(pronunciation_service)),
        scenario: Arc::new(ScenarioController::new(scenario_service)),
        user: Arc::new(UserController::new(user_service)),
    };

    // Start HTTP server with all routes
    let app = create_router(user_repo, controllers);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "yapper_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "yapper_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
