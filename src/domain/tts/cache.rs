use super::artifact::AudioArtifact;
use moka::future::Cache;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt::Display;
use std::future::Future;

/// Observable state of a cache key
#[derive(Debug, Clone, PartialEq)]
pub enum AudioState {
    Pending,
    Ready(AudioArtifact),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AudioCacheError {
    /// Synthesis for this key failed while this caller was waiting on it
    #[error("audio synthesis failed for {key}: {reason}")]
    Failed { key: String, reason: String },
    /// An earlier synthesis for this key failed; the key is not retried
    #[error("audio synthesis disabled for {key} after an earlier failure: {reason}")]
    Disabled { key: String, reason: String },
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Ready(AudioArtifact),
    Failed(String),
}

/// In-memory map from artifact name to synthesized audio.
///
/// At most one synthesis runs per key: concurrent callers for a key that is
/// being synthesized wait for that synthesis and share its outcome. Ready
/// entries are never synthesized again and failed keys stay failed. Nothing
/// is evicted; keys are bounded by the distinct lines actually spoken.
pub struct AudioArtifactCache {
    entries: Cache<String, CacheEntry>,
    in_flight: Mutex<HashSet<String>>,
}

/// Clears the in-flight marker even if the synthesis future is dropped
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}

impl AudioArtifactCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Return the cached artifact for `key`, running `synthesize` only if no
    /// entry exists and no other caller is already synthesizing it.
    pub async fn get_or_create<F, Fut, E>(
        &self,
        key: &str,
        synthesize: F,
    ) -> Result<AudioArtifact, AudioCacheError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AudioArtifact, E>>,
        E: Display,
    {
        let mut synthesized_here = false;

        let entry = self
            .entries
            .get_with(key.to_string(), async {
                synthesized_here = true;
                self.in_flight.lock().insert(key.to_string());
                let _guard = InFlightGuard {
                    in_flight: &self.in_flight,
                    key: key.to_string(),
                };

                tracing::debug!(key, "Audio cache miss, synthesizing");

                match synthesize().await {
                    Ok(artifact) => CacheEntry::Ready(artifact),
                    Err(e) => CacheEntry::Failed(e.to_string()),
                }
            })
            .await;

        match entry {
            CacheEntry::Ready(artifact) => {
                if !synthesized_here {
                    tracing::info!(key, url = %artifact.url, "Audio cache hit");
                }
                Ok(artifact)
            }
            CacheEntry::Failed(reason) if synthesized_here => Err(AudioCacheError::Failed {
                key: key.to_string(),
                reason,
            }),
            CacheEntry::Failed(reason) => Err(AudioCacheError::Disabled {
                key: key.to_string(),
                reason,
            }),
        }
    }

    pub async fn state(&self, key: &str) -> Option<AudioState> {
        if self.in_flight.lock().contains(key) {
            return Some(AudioState::Pending);
        }

        self.entries.get(key).await.map(|entry| match entry {
            CacheEntry::Ready(artifact) => AudioState::Ready(artifact),
            CacheEntry::Failed(reason) => AudioState::Failed(reason),
        })
    }
}

impl Default for AudioArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}
