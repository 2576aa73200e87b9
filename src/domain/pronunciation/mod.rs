pub mod error;
pub mod service;

pub use error::PronunciationServiceError;
use serde::{Deserialize, Serialize};
pub use service::{PronunciationService, PronunciationServiceApi};

/// Locales the speech engine can assess pronunciation for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssessmentLanguage {
    #[default]
    Thai,
    English,
    Spanish,
    French,
}

impl AssessmentLanguage {
    /// Exact locale codes only, matching what the engine expects
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "th-TH" => Some(AssessmentLanguage::Thai),
            "en-US" => Some(AssessmentLanguage::English),
            "es-ES" => Some(AssessmentLanguage::Spanish),
            "fr-FR" => Some(AssessmentLanguage::French),
            _ => None,
        }
    }

    pub fn locale(&self) -> &'static str {
        match self {
            AssessmentLanguage::Thai => "th-TH",
            AssessmentLanguage::English => "en-US",
            AssessmentLanguage::Spanish => "es-ES",
            AssessmentLanguage::French => "fr-FR",
        }
    }

    /// Prosody is only scored for US English
    pub fn supports_prosody(&self) -> bool {
        matches!(self, AssessmentLanguage::English)
    }
}

impl std::fmt::Display for AssessmentLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.locale())
    }
}

/// A recorded attempt at saying `reference_text`
#[derive(Debug, Clone)]
pub struct PronunciationRequest {
    pub reference_text: String,
    pub audio: Vec<u8>,
    pub language: AssessmentLanguage,
}

/// Scores on a hundred-mark scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationAssessment {
    pub accuracy_score: f64,
    pub fluency_score: f64,
    pub completeness_score: f64,
    /// Always serialized; null outside en-US
    pub prosody_score: Option<f64>,
    pub pron_score: f64,
    pub detailed_results: Vec<WordAssessment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordAssessment {
    pub word: String,
    pub accuracy_score: Option<f64>,
    /// `None`, `Mispronunciation`, `Omission`, `Insertion`, ...
    pub error_type: Option<String>,
}

/// Request for POST /api/pronunciation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationAssessmentRequest {
    #[serde(default)]
    pub reference_text: String,
    #[serde(default)]
    pub audio_data: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PronunciationAssessmentResponse {
    pub success: bool,
    pub assessment: PronunciationAssessment,
}
