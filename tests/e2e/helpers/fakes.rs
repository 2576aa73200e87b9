use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use uuid::Uuid;
use yapper_backend::domain::dialogue::{AssistantPersona, ThreadMessage, ThreadRole};
use yapper_backend::domain::pronunciation::{
    PronunciationAssessment, PronunciationRequest, WordAssessment,
};
use yapper_backend::domain::scenario::Scenario;
use yapper_backend::domain::tts::{AudioFormat, SpeechLanguage};
use yapper_backend::domain::user::User;
use yapper_backend::error::AppResult;
use yapper_backend::infrastructure::repositories::{
    AssistantRepository, AudioStorageRepository, CompletionRepository, CompletionRequest,
    ProviderError, ScenarioRepository, SpeechRepository, UserRepository,
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn get(&self, user_id: Uuid) -> Option<User> {
        self.users.lock().iter().find(|u| u.id == user_id).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        Ok(self.get(user_id))
    }

    async fn find_by_tg_id(&self, tg_id: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.tg_id == tg_id).cloned())
    }

    async fn upsert(&self, tg_id: &str, name: &str) -> AppResult<User> {
        let mut users = self.users.lock();
        let now = Utc::now();

        if let Some(user) = users.iter_mut().find(|u| u.tg_id == tg_id) {
            user.name = name.to_string();
            user.updated_at = now;
            return Ok(user.clone());
        }

        let user = User {
            id: Uuid::new_v4(),
            tg_id: tg_id.to_string(),
            name: name.to_string(),
            assistant_id: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn set_assistant_id(&self, user_id: Uuid, assistant_id: &str) -> AppResult<()> {
        if let Some(user) = self.users.lock().iter_mut().find(|u| u.id == user_id) {
            user.assistant_id = Some(assistant_id.to_string());
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryScenarioRepository {
    saved: Mutex<Vec<(Uuid, Uuid)>>,
}

impl InMemoryScenarioRepository {
    /// (user id, scenario id) pairs in insertion order
    pub fn saved(&self) -> Vec<(Uuid, Uuid)> {
        self.saved.lock().clone()
    }
}

#[async_trait]
impl ScenarioRepository for InMemoryScenarioRepository {
    async fn create(&self, user_id: Uuid, _scenario: &Scenario) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        self.saved.lock().push((user_id, id));
        Ok(id)
    }
}

#[derive(Default)]
struct AssistantState {
    assistants: HashSet<String>,
    threads: HashMap<String, Vec<ThreadMessage>>,
    replies: VecDeque<String>,
    next_id: usize,
}

impl AssistantState {
    fn next(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}_{}", prefix, self.next_id)
    }
}

/// Assistant provider that answers each run with the next queued reply
#[derive(Default)]
pub struct FakeAssistantRepository {
    state: Mutex<AssistantState>,
    assistants_created: AtomicUsize,
}

impl FakeAssistantRepository {
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.state.lock().replies.push_back(reply.into());
    }

    pub fn assistants_created(&self) -> usize {
        self.assistants_created.load(Ordering::SeqCst)
    }

    pub fn messages(&self, thread_id: &str) -> Vec<ThreadMessage> {
        self.state
            .lock()
            .threads
            .get(thread_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl AssistantRepository for FakeAssistantRepository {
    async fn create_or_get_assistant(
        &self,
        existing_id: Option<&str>,
        _persona: &AssistantPersona,
    ) -> Result<String, ProviderError> {
        let mut state = self.state.lock();
        if let Some(id) = existing_id.filter(|id| state.assistants.contains(*id)) {
            return Ok(id.to_string());
        }

        let id = state.next("asst");
        state.assistants.insert(id.clone());
        self.assistants_created.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn create_thread(&self) -> Result<String, ProviderError> {
        let mut state = self.state.lock();
        let id = state.next("thread");
        state.threads.insert(id.clone(), Vec::new());
        Ok(id)
    }

    async fn thread_exists(&self, thread_id: &str) -> Result<bool, ProviderError> {
        Ok(self.state.lock().threads.contains_key(thread_id))
    }

    async fn post_message(
        &self,
        thread_id: &str,
        role: ThreadRole,
        content: &str,
    ) -> Result<ThreadMessage, ProviderError> {
        let mut state = self.state.lock();
        let message = ThreadMessage {
            id: state.next("msg"),
            role,
            content: content.to_string(),
        };
        state
            .threads
            .get_mut(thread_id)
            .ok_or_else(|| ProviderError::request("openai", "no such thread"))?
            .push(message.clone());
        Ok(message)
    }

    async fn run(&self, thread_id: &str, _assistant_id: &str) -> Result<(), ProviderError> {
        let mut state = self.state.lock();
        let content = state
            .replies
            .pop_front()
            .unwrap_or_else(|| r#"{"Thai":"ครับ","English":"Yes."}"#.to_string());
        let message = ThreadMessage {
            id: state.next("msg"),
            role: ThreadRole::Assistant,
            content,
        };
        state
            .threads
            .get_mut(thread_id)
            .ok_or_else(|| ProviderError::request("openai", "no such thread"))?
            .push(message);
        Ok(())
    }

    async fn latest_message(&self, thread_id: &str) -> Result<Option<ThreadMessage>, ProviderError> {
        Ok(self.messages(thread_id).pop())
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>, ProviderError> {
        let mut messages = self.messages(thread_id);
        messages.reverse();
        Ok(messages)
    }
}

/// Completion provider replaying queued outputs, `{}` once they run out
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().push_back(reply.into());
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CompletionRepository for ScriptedCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        self.requests.lock().push(request);
        Ok(self
            .replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| "{}".to_string()))
    }
}

pub const FAKE_AUDIO: &[u8] = b"ID3\x04\x00fake-mp3-frames";

/// Speech engine returning fixed audio and fixed scores
#[derive(Default)]
pub struct FakeSpeech {
    synthesize_calls: AtomicUsize,
    voices: Mutex<Vec<String>>,
}

impl FakeSpeech {
    pub fn synthesize_calls(&self) -> usize {
        self.synthesize_calls.load(Ordering::SeqCst)
    }

    pub fn voices(&self) -> Vec<String> {
        self.voices.lock().clone()
    }
}

#[async_trait]
impl SpeechRepository for FakeSpeech {
    async fn synthesize(
        &self,
        _text: &str,
        voice: &str,
        _language: SpeechLanguage,
        _format: AudioFormat,
    ) -> Result<Vec<u8>, ProviderError> {
        self.synthesize_calls.fetch_add(1, Ordering::SeqCst);
        self.voices.lock().push(voice.to_string());
        Ok(FAKE_AUDIO.to_vec())
    }

    async fn assess_pronunciation(
        &self,
        request: PronunciationRequest,
    ) -> Result<PronunciationAssessment, ProviderError> {
        Ok(PronunciationAssessment {
            accuracy_score: 92.0,
            fluency_score: 85.0,
            completeness_score: 100.0,
            prosody_score: Some(78.5),
            pron_score: 88.4,
            detailed_results: vec![WordAssessment {
                word: request.reference_text,
                accuracy_score: Some(92.0),
                error_type: Some("None".to_string()),
            }],
        })
    }
}

pub const STORAGE_URL: &str = "https://storage.test/audio";

/// Object store that can be told to silently drop uploads
#[derive(Default)]
pub struct MemoryStorage {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    drop_uploads: AtomicBool,
}

impl MemoryStorage {
    pub fn drop_uploads(&self) {
        self.drop_uploads.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.objects.lock().contains_key(file_name)
    }
}

#[async_trait]
impl AudioStorageRepository for MemoryStorage {
    async fn upload(
        &self,
        file_name: &str,
        data: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), ProviderError> {
        if !self.drop_uploads.load(Ordering::SeqCst) {
            self.objects.lock().insert(file_name.to_string(), data);
        }
        Ok(())
    }

    async fn download(&self, file_name: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        Ok(self.objects.lock().get(file_name).cloned())
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", STORAGE_URL, file_name)
    }
}
