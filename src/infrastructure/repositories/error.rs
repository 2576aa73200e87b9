/// Failure of a call to a third-party provider (OpenAI, Azure Speech, Supabase Storage)
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },
    #[error("{provider} call timed out after {seconds}s")]
    Timeout { provider: &'static str, seconds: u64 },
}

impl ProviderError {
    pub fn request(provider: &'static str, message: impl ToString) -> Self {
        Self::Request {
            provider,
            message: message.to_string(),
        }
    }

    /// Classify a transport failure from a reqwest client built with `timeout`
    pub fn from_reqwest(
        provider: &'static str,
        err: reqwest::Error,
        timeout: std::time::Duration,
    ) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider,
                seconds: timeout.as_secs(),
            }
        } else {
            Self::request(provider, err)
        }
    }

    /// Turn a non-success response into a `Status` error, consuming the body
    pub async fn from_response(provider: &'static str, response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self::Status {
            provider,
            status,
            body,
        }
    }
}
