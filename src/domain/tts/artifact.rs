use super::voice::SpeechLanguage;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hex characters of the text digest kept in artifact names
const HASH_LENGTH: usize = 32;

/// Audio encodings requested from the speech engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// 16 kHz, 32 kbit/s mono MP3
    Mp3Mono16Khz,
}

impl AudioFormat {
    /// Value of the engine's output format header
    pub fn engine_name(&self) -> &'static str {
        match self {
            AudioFormat::Mp3Mono16Khz => "audio-16khz-32kbitrate-mono-mp3",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3Mono16Khz => "audio/mpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3Mono16Khz => "mp3",
        }
    }
}

/// A synthesized, uploaded and verified audio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioArtifact {
    pub url: String,
    pub size: usize,
    pub file_name: String,
    pub verified: bool,
}

/// Deterministic name for the audio of `text` spoken by `voice`.
///
/// `<locale>-<voice>-<sha256(text)[..32]>`, all lowercase, with the locale
/// prefix removed from the voice name: `th-th-premwadeeneural-3f1c...`.
pub fn artifact_name(language: SpeechLanguage, voice: &str, text: &str) -> String {
    let locale = language.locale().to_lowercase();
    let voice = voice.to_lowercase();
    let voice = voice
        .strip_prefix(&format!("{}-", locale))
        .unwrap_or(&voice);

    let digest = hex::encode(Sha256::digest(text.as_bytes()));

    format!("{}-{}-{}", locale, voice, &digest[..HASH_LENGTH])
}
