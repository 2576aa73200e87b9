use super::error::ProviderError;
use async_trait::async_trait;

/// Repository for the public object store holding synthesized audio
#[async_trait]
pub trait AudioStorageRepository: Send + Sync {
    /// Store `data` under `file_name`, replacing any existing object
    async fn upload(
        &self,
        file_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ProviderError>;

    /// Read an object back; `None` when it does not exist
    async fn download(&self, file_name: &str) -> Result<Option<Vec<u8>>, ProviderError>;

    /// Public URL of an object. Does not check that the object exists.
    fn public_url(&self, file_name: &str) -> String;
}
