use serde_json::{json, Value};
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
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
    user::{User, UserService},
};
use yapper_backend::infrastructure::http::{create_router, Controllers};
use yapper_backend::infrastructure::repositories::UserRepository;

pub mod api_client;
pub mod fakes;

use api_client::TestClient;
use fakes::{
    FakeAssistantRepository, FakeSpeech, InMemoryScenarioRepository, InMemoryUserRepository,
    MemoryStorage, ScriptedCompletion,
};

pub struct TestContext {
    pub client: TestClient,
    pub users: Arc<InMemoryUserRepository>,
    pub scenarios: Arc<InMemoryScenarioRepository>,
    pub assistant: Arc<FakeAssistantRepository>,
    pub completion: Arc<ScriptedCompletion>,
    pub speech: Arc<FakeSpeech>,
    pub storage: Arc<MemoryStorage>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let users = Arc::new(InMemoryUserRepository::default());
            let scenarios = Arc::new(InMemoryScenarioRepository::default());
            let assistant = Arc::new(FakeAssistantRepository::default());
            let completion = Arc::new(ScriptedCompletion::default());
            let speech = Arc::new(FakeSpeech::default());
            let storage = Arc::new(MemoryStorage::default());

            let user_repo: Arc<dyn UserRepository> = users.clone();

            let controllers = Controllers {
                thread: Arc::new(ThreadController::new(Arc::new(DialogueService::new(
                    user_repo.clone(),
                    assistant.clone(),
                    AssistantPersona::street_vendor(),
                )))),
                recommend: Arc::new(RecommendController::new(Arc::new(
                    RecommendationService::new(completion.clone()),
                ))),
                edit: Arc::new(EditController::new(Arc::new(EditorService::new(
                    completion.clone(),
                )))),
                tts: Arc::new(TtsController::new(Arc::new(TtsService::new(
                    speech.clone(),
                    storage.clone(),
                    Some(Arc::new(AudioArtifactCache::new())),
                )))),
                pronunciation: Arc::new(PronunciationController::new(Arc::new(
                    PronunciationService::new(speech.clone()),
                ))),
                scenario: Arc::new(ScenarioController::new(Arc::new(ScenarioService::new(
                    user_repo.clone(),
                    scenarios.clone(),
                    completion.clone(),
                )))),
                user: Arc::new(UserController::new(Arc::new(UserService::new(
                    user_repo.clone(),
                )))),
            };

            let app = create_router(user_repo, controllers);

            // Start server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                users,
                scenarios,
                assistant,
                completion,
                speech,
                storage,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

impl TestContext {
    /// Register a learner directly in the user store
    pub async fn create_user(&self, tg_id: &str, name: &str) -> User {
        self.users
            .upsert(tg_id, name)
            .await
            .expect("Failed to create user")
    }
}

/// Raw bilingual payload as the models emit it
pub fn bilingual(thai: &str, english: &str) -> String {
    json!({ "Thai": thai, "English": english }).to_string()
}

pub fn scenario_payload(phrases: usize, characters: usize) -> Value {
    json!({
        "scenario": {
            "narrative": "Buying mangoes from a fruit stall",
            "location": "Or Tor Kor Market, Bangkok",
            "time_period": "Morning",
            "cultural_context": "Polite bargaining is expected",
            "difficulty_level": "beginner",
            "background_description": "Piles of fruit under bright umbrellas"
        },
        "phrases": (0..phrases)
            .map(|i| json!({
                "thai": format!("มะม่วงกิโลละเท่าไหร่ {}", i),
                "english": format!("How much per kilo {}", i),
                "romanization": "ma-muang ki-lo la tao-rai",
                "formality": "polite",
                "usage_context": "Asking the price",
                "cultural_notes": "Add ครับ or ค่ะ at the end"
            }))
            .collect::<Vec<_>>(),
        "characters": (0..characters)
            .map(|i| json!({
                "name": format!("Khun Malee {}", i),
                "age": 40 + i,
                "occupation": "fruit seller",
                "personality": "warm",
                "speaking_style": "slow and clear",
                "background_story": "Has sold fruit here for twenty years",
                "type": "elder_female",
                "avatar_description": "Straw hat and a green apron"
            }))
            .collect::<Vec<_>>()
    })
}
