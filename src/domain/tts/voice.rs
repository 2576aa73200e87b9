use serde::{Deserialize, Serialize};

/// Locales the speech gateway can synthesize
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpeechLanguage {
    #[default]
    Thai,
    English,
}

impl SpeechLanguage {
    /// Parse a locale code. Accepts the full locale (`th-TH`) or the bare
    /// language (`th`), case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "th-th" | "th" => Some(SpeechLanguage::Thai),
            "en-us" | "en" => Some(SpeechLanguage::English),
            _ => None,
        }
    }

    pub fn locale(&self) -> &'static str {
        match self {
            SpeechLanguage::Thai => "th-TH",
            SpeechLanguage::English => "en-US",
        }
    }
}

impl std::fmt::Display for SpeechLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.locale())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    #[default]
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOptions {
    #[serde(default)]
    pub gender: VoiceGender,
}

/// Neural voices available per locale and gender, in preference order
pub fn voices_for(language: SpeechLanguage, gender: VoiceGender) -> &'static [&'static str] {
    match (language, gender) {
        (SpeechLanguage::Thai, VoiceGender::Female) => {
            &["th-TH-PremwadeeNeural", "th-TH-AchararatNeural"]
        }
        (SpeechLanguage::Thai, VoiceGender::Male) => &["th-TH-NiwatNeural", "th-TH-PrabhaatNeural"],
        (SpeechLanguage::English, VoiceGender::Female) => &["en-US-JennyMultilingualNeural"],
        (SpeechLanguage::English, VoiceGender::Male) => &["en-US-GuyMultilingualNeural"],
    }
}

/// Pick the voice for a language and gender: always the first of the list
pub fn select_voice(language: SpeechLanguage, options: VoiceOptions) -> &'static str {
    voices_for(language, options.gender)[0]
}
