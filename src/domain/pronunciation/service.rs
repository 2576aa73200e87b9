use super::error::PronunciationServiceError;
use super::{AssessmentLanguage, PronunciationAssessment, PronunciationRequest};
use crate::infrastructure::repositories::SpeechRepository;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;

pub struct PronunciationService {
    speech_repo: Arc<dyn SpeechRepository>,
}

impl PronunciationService {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>) -> Self {
        Self { speech_repo }
    }
}

#[async_trait]
pub trait PronunciationServiceApi: Send + Sync {
    /// Score a base64-encoded recording against the text it should contain
    async fn assess(
        &self,
        reference_text: String,
        audio_base64: String,
        language: Option<String>,
    ) -> Result<PronunciationAssessment, PronunciationServiceError>;
}

#[async_trait]
impl PronunciationServiceApi for PronunciationService {
    async fn assess(
        &self,
        reference_text: String,
        audio_base64: String,
        language: Option<String>,
    ) -> Result<PronunciationAssessment, PronunciationServiceError> {
        let reference_text = reference_text.trim();
        if reference_text.is_empty() || audio_base64.trim().is_empty() {
            return Err(PronunciationServiceError::Invalid(
                "Missing required fields".to_string(),
            ));
        }

        let language = match language.as_deref() {
            None => AssessmentLanguage::default(),
            Some(code) => AssessmentLanguage::from_code(code).ok_or_else(|| {
                PronunciationServiceError::Invalid(format!("Unsupported language: {}", code))
            })?,
        };

        let audio = decode_audio(&audio_base64)?;

        tracing::info!(
            language = %language,
            reference_length = reference_text.len(),
            audio_size = audio.len(),
            "Pronunciation assessment request"
        );

        let mut assessment = self
            .speech_repo
            .assess_pronunciation(PronunciationRequest {
                reference_text: reference_text.to_string(),
                audio,
                language,
            })
            .await
            .map_err(|e| PronunciationServiceError::Dependency(e.to_string()))?;

        if !language.supports_prosody() {
            assessment.prosody_score = None;
        }

        Ok(assessment)
    }
}

/// Decode base64 audio, tolerating a `data:<mime>;base64,` prefix
fn decode_audio(encoded: &str) -> Result<Vec<u8>, PronunciationServiceError> {
    let encoded = encoded.trim();
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, payload)) if prefix.starts_with("data:") => payload,
        _ => encoded,
    };

    let audio = STANDARD.decode(payload).map_err(|_| {
        PronunciationServiceError::Invalid(
            "Invalid audio data: must be base64 encoded audio".to_string(),
        )
    })?;

    if audio.is_empty() {
        return Err(PronunciationServiceError::Invalid(
            "Invalid audio data: empty recording".to_string(),
        ));
    }

    Ok(audio)
}
