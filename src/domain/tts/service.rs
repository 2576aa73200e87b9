use super::artifact::{artifact_name, AudioArtifact, AudioFormat};
use super::cache::AudioArtifactCache;
use super::error::TtsServiceError;
use super::voice::{select_voice, SpeechLanguage, VoiceOptions};
use crate::infrastructure::repositories::{AudioStorageRepository, SpeechRepository};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

pub struct TtsService {
    speech_repo: Arc<dyn SpeechRepository>,
    storage_repo: Arc<dyn AudioStorageRepository>,
    cache: Option<Arc<AudioArtifactCache>>,
}

impl TtsService {
    pub fn new(
        speech_repo: Arc<dyn SpeechRepository>,
        storage_repo: Arc<dyn AudioStorageRepository>,
        cache: Option<Arc<AudioArtifactCache>>,
    ) -> Self {
        Self {
            speech_repo,
            storage_repo,
            cache,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Turn text into a hosted audio file
    ///
    /// This operation:
    /// - Validates the text and language (`th-TH` by default)
    /// - Picks the voice for the language and requested gender
    /// - Synthesizes, uploads and reads the file back before exposing its URL
    ///
    /// Identical (text, language, voice) requests share one artifact when
    /// the audio cache is enabled.
    async fn synthesize(
        &self,
        text: String,
        language: Option<String>,
        voice_options: Option<VoiceOptions>,
    ) -> Result<AudioArtifact, TtsServiceError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        text: String,
        language: Option<String>,
        voice_options: Option<VoiceOptions>,
    ) -> Result<AudioArtifact, TtsServiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TtsServiceError::Invalid("Text is required".to_string()));
        }

        let language = parse_language(language.as_deref())?;
        let voice = select_voice(language, voice_options.unwrap_or_default());
        let name = artifact_name(language, voice, text);

        tracing::info!(
            language = %language,
            voice,
            artifact = %name,
            text_length = text.len(),
            "TTS synthesis request"
        );

        match &self.cache {
            Some(cache) => Ok(cache
                .get_or_create(&name, || {
                    self.synthesize_uncached(text, language, voice, &name)
                })
                .await?),
            None => self.synthesize_uncached(text, language, voice, &name).await,
        }
    }
}

impl TtsService {
    /// Engine call, upload and read-back verification for one artifact
    async fn synthesize_uncached(
        &self,
        text: &str,
        language: SpeechLanguage,
        voice: &str,
        name: &str,
    ) -> Result<AudioArtifact, TtsServiceError> {
        let start_time = Instant::now();
        let format = AudioFormat::Mp3Mono16Khz;
        let file_name = format!("{}.{}", name, format.extension());

        let audio = self
            .speech_repo
            .synthesize(text, voice, language, format)
            .await
            .map_err(|e| TtsServiceError::Dependency(e.to_string()))?;

        if audio.is_empty() {
            return Err(TtsServiceError::Dependency(
                "Speech engine returned no audio".to_string(),
            ));
        }
        let size = audio.len();

        self.storage_repo
            .upload(&file_name, audio, format.content_type())
            .await
            .map_err(|e| TtsServiceError::Dependency(e.to_string()))?;

        let stored = self
            .storage_repo
            .download(&file_name)
            .await
            .map_err(|e| TtsServiceError::Unverified(e.to_string()))?
            .ok_or_else(|| {
                TtsServiceError::Unverified(format!("{} not found after upload", file_name))
            })?;

        if stored.len() != size {
            return Err(TtsServiceError::Unverified(format!(
                "{} has {} bytes in storage, uploaded {}",
                file_name,
                stored.len(),
                size
            )));
        }

        let url = self.storage_repo.public_url(&file_name);

        tracing::info!(
            file_name = %file_name,
            size,
            latency_ms = start_time.elapsed().as_millis(),
            "Audio synthesized and verified"
        );

        Ok(AudioArtifact {
            url,
            size,
            file_name,
            verified: true,
        })
    }
}

fn parse_language(code: Option<&str>) -> Result<SpeechLanguage, TtsServiceError> {
    match code.map(str::trim).filter(|c| !c.is_empty()) {
        None => Ok(SpeechLanguage::default()),
        Some(code) => SpeechLanguage::from_code(code)
            .ok_or_else(|| TtsServiceError::Invalid(format!("Unsupported language: {}", code))),
    }
}
