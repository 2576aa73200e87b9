use super::error::ProviderError;
use crate::domain::pronunciation::{PronunciationAssessment, PronunciationRequest};
use crate::domain::tts::{AudioFormat, SpeechLanguage};
use async_trait::async_trait;

/// Repository for the speech engine: synthesis and pronunciation scoring.
///
/// Implementations own the transport details (endpoints, auth, SSML, audio
/// container headers). Callers pass an already selected voice.
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Synthesize `text` with `voice`, returning the encoded audio
    ///
    /// An empty result is returned as-is; callers decide whether that is a failure.
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        language: SpeechLanguage,
        format: AudioFormat,
    ) -> Result<Vec<u8>, ProviderError>;

    /// Score a recording against its reference text on a hundred-mark scale
    async fn assess_pronunciation(
        &self,
        request: PronunciationRequest,
    ) -> Result<PronunciationAssessment, ProviderError>;
}
