use super::error::ProviderError;
use async_openai::error::OpenAIError;
use std::future::Future;
use std::time::{Duration, Instant};

pub(super) const PROVIDER: &str = "openai";

/// Await an OpenAI call with an upper bound on its duration
pub(super) async fn bounded<T, F>(
    operation: &'static str,
    timeout: Duration,
    call: F,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, OpenAIError>>,
{
    let start_time = Instant::now();

    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => {
            tracing::debug!(
                provider = PROVIDER,
                operation,
                latency_ms = start_time.elapsed().as_millis(),
                "OpenAI call succeeded"
            );
            Ok(value)
        }
        Ok(Err(e)) => {
            tracing::error!(
                provider = PROVIDER,
                operation,
                error = %e,
                latency_ms = start_time.elapsed().as_millis(),
                "OpenAI call failed"
            );
            Err(ProviderError::request(PROVIDER, e))
        }
        Err(_) => {
            tracing::error!(
                provider = PROVIDER,
                operation,
                timeout_secs = timeout.as_secs(),
                "OpenAI call timed out"
            );
            Err(ProviderError::Timeout {
                provider: PROVIDER,
                seconds: timeout.as_secs(),
            })
        }
    }
}

pub(super) fn build_error(e: OpenAIError) -> ProviderError {
    ProviderError::request(PROVIDER, format!("invalid request: {}", e))
}
