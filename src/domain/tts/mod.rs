pub mod artifact;
pub mod cache;
pub mod error;
pub mod service;
pub mod voice;

pub use artifact::{artifact_name, AudioArtifact, AudioFormat};
pub use cache::{AudioArtifactCache, AudioCacheError, AudioState};
pub use error::TtsServiceError;
use serde::Deserialize;
pub use service::{TtsService, TtsServiceApi};
pub use voice::{select_voice, SpeechLanguage, VoiceGender, VoiceOptions};

/// Request for POST /api/tts
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtsRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub voice_options: Option<VoiceOptions>,
}
