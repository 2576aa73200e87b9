pub mod assistant_repository;
pub mod audio_storage_repository;
pub mod azure_speech_repository;
pub mod completion_repository;
pub mod error;
mod openai_call;
pub mod openai_assistant_repository;
pub mod openai_completion_repository;
pub mod scenario_repository;
pub mod speech_repository;
pub mod supabase_audio_storage_repository;
pub mod user_repository;

pub use assistant_repository::AssistantRepository;
pub use audio_storage_repository::AudioStorageRepository;
pub use azure_speech_repository::AzureSpeechRepository;
pub use completion_repository::{CompletionRepository, CompletionRequest};
pub use error::ProviderError;
pub use openai_assistant_repository::OpenAiAssistantRepository;
pub use openai_completion_repository::OpenAiCompletionRepository;
pub use scenario_repository::{PgScenarioRepository, ScenarioRepository};
pub use speech_repository::SpeechRepository;
pub use supabase_audio_storage_repository::SupabaseAudioStorageRepository;
pub use user_repository::{PgUserRepository, UserRepository};
