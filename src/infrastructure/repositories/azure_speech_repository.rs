use super::error::ProviderError;
use super::speech_repository::SpeechRepository;
use crate::domain::pronunciation::{
    PronunciationAssessment, PronunciationRequest, WordAssessment,
};
use crate::domain::tts::{AudioFormat, SpeechLanguage};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const PROVIDER: &str = "azure-speech";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const RECORDING_CONTENT_TYPE: &str = "audio/wav; codecs=audio/pcm; samplerate=16000";

/// Azure Speech REST implementation of the speech repository
pub struct AzureSpeechRepository {
    client: Client,
    subscription_key: String,
    tts_endpoint: String,
    stt_endpoint: String,
    timeout: Duration,
}

impl AzureSpeechRepository {
    pub fn new(
        subscription_key: String,
        region: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Self::with_endpoints(
            subscription_key,
            format!("https://{}.tts.speech.microsoft.com", region),
            format!("https://{}.stt.speech.microsoft.com", region),
            timeout,
        )
    }

    /// Point the repository at explicit hosts (regional overrides, tests)
    pub fn with_endpoints(
        subscription_key: String,
        tts_endpoint: String,
        stt_endpoint: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::request(PROVIDER, e))?;

        Ok(Self {
            client,
            subscription_key,
            tts_endpoint: tts_endpoint.trim_end_matches('/').to_string(),
            stt_endpoint: stt_endpoint.trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

#[async_trait]
impl SpeechRepository for AzureSpeechRepository {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        language: SpeechLanguage,
        format: AudioFormat,
    ) -> Result<Vec<u8>, ProviderError> {
        let start_time = Instant::now();
        let url = format!("{}/cognitiveservices/v1", self.tts_endpoint);

        tracing::debug!(voice, language = %language, text_length = text.len(), "Calling Azure TTS");

        let response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .header(header::CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", format.engine_name())
            .header(header::USER_AGENT, "yapper-backend")
            .body(build_ssml(text, voice, language))
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e, self.timeout))?;

        if !response.status().is_success() {
            let err = ProviderError::from_response(PROVIDER, response).await;
            tracing::error!(error = %err, voice, "Azure TTS request failed");
            return Err(err);
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e, self.timeout))?;

        tracing::info!(
            provider = PROVIDER,
            voice,
            audio_size = audio.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Azure TTS synthesis finished"
        );

        Ok(audio.to_vec())
    }

    async fn assess_pronunciation(
        &self,
        request: PronunciationRequest,
    ) -> Result<PronunciationAssessment, ProviderError> {
        let start_time = Instant::now();
        let url = format!(
            "{}/speech/recognition/conversation/cognitiveservices/v1",
            self.stt_endpoint
        );
        let config = assessment_header(&request)?;

        let response = self
            .client
            .post(&url)
            .query(&[
                ("language", request.language.locale()),
                ("format", "detailed"),
            ])
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .header(header::CONTENT_TYPE, RECORDING_CONTENT_TYPE)
            .header(header::ACCEPT, "application/json")
            .header("Pronunciation-Assessment", config)
            .body(request.audio)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e, self.timeout))?;

        if !response.status().is_success() {
            let err = ProviderError::from_response(PROVIDER, response).await;
            tracing::error!(error = %err, "Azure pronunciation assessment failed");
            return Err(err);
        }

        let recognition: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::request(PROVIDER, format!("invalid response: {}", e)))?;

        let assessment = recognition.into_assessment()?;

        tracing::info!(
            provider = PROVIDER,
            language = %request.language,
            pron_score = assessment.pron_score,
            words = assessment.detailed_results.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Azure pronunciation assessment finished"
        );

        Ok(assessment)
    }
}

fn build_ssml(text: &str, voice: &str, language: SpeechLanguage) -> String {
    format!(
        "<speak version='1.0' xmlns='http://www.w3.org/2001/10/synthesis' xml:lang='{}'><voice name='{}'>{}</voice></speak>",
        language.locale(),
        voice,
        escape_xml(text)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AssessmentConfig<'a> {
    reference_text: &'a str,
    grading_system: &'static str,
    granularity: &'static str,
    dimension: &'static str,
    enable_miscue: bool,
    enable_prosody_assessment: bool,
}

/// Base64 JSON value of the `Pronunciation-Assessment` header
fn assessment_header(request: &PronunciationRequest) -> Result<String, ProviderError> {
    let config = AssessmentConfig {
        reference_text: &request.reference_text,
        grading_system: "HundredMark",
        granularity: "Phoneme",
        dimension: "Comprehensive",
        enable_miscue: true,
        enable_prosody_assessment: request.language.supports_prosody(),
    };
    let json = serde_json::to_vec(&config).map_err(|e| ProviderError::request(PROVIDER, e))?;
    Ok(STANDARD.encode(json))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default, rename = "NBest")]
    n_best: Vec<RecognitionCandidate>,
}

/// Scores appear either nested under `PronunciationAssessment` or inline,
/// depending on the API version
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Scores {
    accuracy_score: Option<f64>,
    fluency_score: Option<f64>,
    completeness_score: Option<f64>,
    prosody_score: Option<f64>,
    pron_score: Option<f64>,
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionCandidate {
    pronunciation_assessment: Option<Scores>,
    #[serde(flatten)]
    inline: Scores,
    #[serde(default)]
    words: Vec<RecognizedWord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognizedWord {
    word: String,
    pronunciation_assessment: Option<Scores>,
    #[serde(flatten)]
    inline: Scores,
}

impl RecognitionResponse {
    fn into_assessment(self) -> Result<PronunciationAssessment, ProviderError> {
        if self.recognition_status != "Success" {
            return Err(ProviderError::request(
                PROVIDER,
                format!("speech not recognized: {}", self.recognition_status),
            ));
        }

        let best = self
            .n_best
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::request(PROVIDER, "no recognition candidates"))?;

        let scores = best.pronunciation_assessment.unwrap_or(best.inline);
        let required = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| ProviderError::request(PROVIDER, format!("missing {}", name)))
        };

        let detailed_results = best
            .words
            .into_iter()
            .map(|word| {
                let scores = word.pronunciation_assessment.unwrap_or(word.inline);
                WordAssessment {
                    word: word.word,
                    accuracy_score: scores.accuracy_score,
                    error_type: scores.error_type,
                }
            })
            .collect();

        Ok(PronunciationAssessment {
            accuracy_score: required(scores.accuracy_score, "AccuracyScore")?,
            fluency_score: required(scores.fluency_score, "FluencyScore")?,
            completeness_score: required(scores.completeness_score, "CompletenessScore")?,
            prosody_score: scores.prosody_score,
            pron_score: required(scores.pron_score, "PronScore")?,
            detailed_results,
        })
    }
}
