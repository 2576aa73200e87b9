use super::audio_storage_repository::AudioStorageRepository;
use super::error::ProviderError;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::time::{Duration, Instant};

const PROVIDER: &str = "supabase-storage";
const CACHE_CONTROL: &str = "max-age=3600";

/// Supabase Storage REST implementation of the audio storage repository
pub struct SupabaseAudioStorageRepository {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
    timeout: Duration,
}

impl SupabaseAudioStorageRepository {
    pub fn new(
        base_url: String,
        service_key: String,
        bucket: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::request(PROVIDER, e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
            timeout,
        })
    }

    fn object_url(&self, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(file_name)
        )
    }
}

#[async_trait]
impl AudioStorageRepository for SupabaseAudioStorageRepository {
    async fn upload(
        &self,
        file_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ProviderError> {
        let start_time = Instant::now();
        let size = data.len();

        let response = self
            .client
            .post(self.object_url(file_name))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, CACHE_CONTROL)
            .header("x-upsert", "true")
            .body(data)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e, self.timeout))?;

        if !response.status().is_success() {
            let err = ProviderError::from_response(PROVIDER, response).await;
            tracing::error!(error = %err, file_name, "Audio upload failed");
            return Err(err);
        }

        tracing::info!(
            provider = PROVIDER,
            bucket = %self.bucket,
            file_name,
            size,
            latency_ms = start_time.elapsed().as_millis(),
            "Audio uploaded"
        );

        Ok(())
    }

    async fn download(&self, file_name: &str) -> Result<Option<Vec<u8>>, ProviderError> {
        let response = self
            .client
            .get(self.object_url(file_name))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e, self.timeout))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let err = ProviderError::from_response(PROVIDER, response).await;
            // Storage reports missing objects as 400 with a not_found payload
            if let ProviderError::Status { status: 400, body, .. } = &err {
                if body.contains("not_found") || body.contains("Object not found") {
                    return Ok(None);
                }
            }
            return Err(err);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e, self.timeout))?;

        tracing::debug!(file_name, size = bytes.len(), "Audio read back from storage");

        Ok(Some(bytes.to_vec()))
    }

    fn public_url(&self, file_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            urlencoding::encode(file_name)
        )
    }
}
