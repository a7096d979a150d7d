use super::{shard_file_name, ShardSource, MANIFEST_FILE};
use crate::domain::ShardKey;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Synchronous HTTP client for a search directory published on a web server.
///
/// This client uses `ureq` for blocking requests; [`HttpShardSource`] runs it
/// on the blocking thread pool.
#[derive(Clone)]
pub struct HttpShardClient {
    /// URL of the published `search/` directory
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl HttpShardClient {
    /// Create a client for `base_url` with a request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url: base_url.into(),
            agent: Arc::new(agent),
        }
    }

    /// Build a full URL from a file name.
    fn build_url(&self, file: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/{}", base, urlencoding::encode(file))
    }

    /// Fetch the manifest text.
    pub fn get_manifest(&self) -> StoreResult<String> {
        self.get_text(MANIFEST_FILE).map_err(|e| match e {
            FetchError::NotFound => {
                StoreError::ManifestUnavailable(format!("{} not found", self.build_url(MANIFEST_FILE)))
            }
            FetchError::Failed(message) => StoreError::ManifestUnavailable(message),
        })
    }

    /// Fetch the text of one shard.
    pub fn get_shard(&self, key: &ShardKey) -> StoreResult<String> {
        self.get_text(&shard_file_name(key)).map_err(|e| match e {
            FetchError::NotFound => StoreError::ShardNotFound(key.to_string()),
            FetchError::Failed(message) => StoreError::Transport {
                shard: key.to_string(),
                message,
            },
        })
    }

    fn get_text(&self, file: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let url = self.build_url(file);

        let result = match self.agent.get(&url).call() {
            Ok(response) => response
                .into_string()
                .map_err(|e| FetchError::Failed(format!("Failed to read body: {}", e))),
            Err(ureq::Error::Status(404, _)) | Err(ureq::Error::Status(410, _)) => {
                Err(FetchError::NotFound)
            }
            Err(ureq::Error::Status(code, _)) => {
                Err(FetchError::Failed(format!("HTTP status {}", code)))
            }
            Err(ureq::Error::Transport(transport)) => Err(FetchError::Failed(transport.to_string())),
        };

        tracing::debug!(
            url = %url,
            duration_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "GET completed"
        );

        result
    }
}

enum FetchError {
    NotFound,
    Failed(String),
}

/// Async shard source over [`HttpShardClient`].
///
/// Uses `tokio::task::spawn_blocking` so blocking requests never stall the
/// runtime that handles keystrokes.
#[derive(Clone)]
pub struct HttpShardSource {
    client: Arc<HttpShardClient>,
}

impl HttpShardSource {
    pub fn new(client: HttpShardClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl ShardSource for HttpShardSource {
    async fn fetch_manifest(&self) -> StoreResult<String> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_manifest())
            .await
            .map_err(|e| StoreError::ManifestUnavailable(format!("Task join error: {}", e)))?
    }

    async fn fetch_shard(&self, key: &ShardKey) -> StoreResult<String> {
        let client = self.client.clone();
        let owned_key = key.clone();

        tokio::task::spawn_blocking(move || client.get_shard(&owned_key))
            .await
            .map_err(|e| StoreError::Transport {
                shard: key.to_string(),
                message: format!("Task join error: {}", e),
            })?
    }

    fn describe(&self) -> String {
        format!("http {}", self.client.base_url)
    }
}
