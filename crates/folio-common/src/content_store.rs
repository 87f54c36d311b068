/// JSON content store over [`KvStore`].
///
/// Reads seed the supplied default on first access; writes overwrite. Both wait a
/// fixed artificial latency first. Failures are logged and absorbed, so callers
/// cannot tell a stored value from a fallback default.
use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::kv::KvStore;

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(50);

/// Lowercase hex SHA-256 of `json`.
pub fn fingerprint_of(json: &str) -> String {
    format!("{:x}", Sha256::digest(json.as_bytes()))
}

/// Where and how content is persisted, read from the environment.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Redis connection URL. Preferred when set and reachable.
    pub redis_url: Option<String>,
    /// Directory used by the file backend.
    pub data_dir: PathBuf,
    /// Artificial delay applied before every read and write.
    pub latency: Duration,
}

impl StoreConfig {
    /// Optional:
    /// - `REDIS_URL`
    /// - `FOLIO_DATA_DIR` (default: "./data")
    /// - `FOLIO_STORE_LATENCY_MS` (default: 50; 0 disables the delay)
    pub fn from_env() -> Self {
        let latency = std::env::var("FOLIO_STORE_LATENCY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_LATENCY);

        Self {
            redis_url: std::env::var("REDIS_URL").ok().filter(|s| !s.trim().is_empty()),
            data_dir: std::env::var("FOLIO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./data")),
            latency,
        }
    }

    /// Pick a backend: Redis when configured and answering PING, else the data directory.
    pub async fn open(&self) -> ContentStore {
        if let Some(url) = &self.redis_url {
            if let Some(kv) = KvStore::redis(url) {
                if kv.is_available().await {
                    info!("redis connected, using it for content");
                    return ContentStore::new(kv, self.latency);
                }
            }
            info!("redis unavailable, falling back to data directory");
        }
        let kv = KvStore::directory(&self.data_dir);
        if !kv.is_available().await {
            warn!(dir = %self.data_dir.display(), "data directory unavailable, writes will be dropped");
        }
        ContentStore::new(kv, self.latency)
    }
}

#[derive(Clone)]
pub struct ContentStore {
    kv: KvStore,
    latency: Duration,
}

impl ContentStore {
    pub fn new(kv: KvStore, latency: Duration) -> Self {
        Self { kv, latency }
    }

    /// In-memory store without latency.
    pub fn in_memory() -> Self {
        Self::new(KvStore::memory(), Duration::ZERO)
    }

    pub fn backend_kind(&self) -> &'static str {
        self.kv.kind()
    }

    /// Return the stored value for `key`, or persist and return `default`.
    ///
    /// A missing or empty value seeds `default`. A value that fails to parse is left in
    /// place and `default` is returned without being written.
    pub async fn get<T>(&self, key: &str, default: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        self.delay().await;
        match self.kv.get(key).await {
            Some(raw) if !raw.is_empty() => serde_json::from_str(&raw)
                .inspect_err(|e| warn!(error = %e, key, "stored content failed to parse, using default"))
                .unwrap_or(default),
            _ => {
                debug!(key, "seeding default content");
                match serde_json::to_string(&default) {
                    Ok(json) => {
                        self.kv.set(key, &json).await;
                    }
                    Err(e) => warn!(error = %e, key, "default content failed to serialize"),
                }
                default
            }
        }
    }

    /// Serialize and persist `value` under `key`. Failures are logged and dropped.
    pub async fn set<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        self.delay().await;
        match serde_json::to_string(value) {
            Ok(json) => {
                if !self.kv.set(key, &json).await {
                    warn!(key, "content write dropped");
                }
            }
            Err(e) => warn!(error = %e, key, "content failed to serialize, write dropped"),
        }
    }

    /// Raw stored JSON, without latency or seeding.
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.kv.get(key).await
    }

    /// SHA-256 of the raw stored bytes, as lowercase hex.
    pub async fn fingerprint(&self, key: &str) -> Option<String> {
        let raw = self.kv.get(key).await?;
        Some(fingerprint_of(&raw))
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Doc {
        title: String,
        tags: Vec<String>,
    }

    fn doc(title: &str) -> Doc {
        Doc {
            title: title.to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[tokio::test]
    async fn get_seeds_default_once() {
        let store = ContentStore::in_memory();
        assert_eq!(store.get("k", doc("first")).await, doc("first"));
        assert!(store.raw("k").await.is_some());
        // A different default no longer wins.
        assert_eq!(store.get("k", doc("second")).await, doc("first"));
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let store = ContentStore::in_memory();
        store.set("k", &doc("saved")).await;
        assert_eq!(store.get("k", doc("default")).await, doc("saved"));
    }

    #[tokio::test]
    async fn empty_value_is_treated_as_missing() {
        let kv = KvStore::memory();
        kv.set("k", "").await;
        let store = ContentStore::new(kv, Duration::ZERO);
        assert_eq!(store.get("k", doc("seed")).await, doc("seed"));
        assert_eq!(store.get("k", doc("other")).await, doc("seed"));
    }

    #[tokio::test]
    async fn corrupt_value_falls_back_without_overwrite() {
        let kv = KvStore::memory();
        kv.set("k", "{not json").await;
        let store = ContentStore::new(kv, Duration::ZERO);
        assert_eq!(store.get("k", doc("fallback")).await, doc("fallback"));
        assert_eq!(store.raw("k").await.as_deref(), Some("{not json"));
    }

    #[tokio::test]
    async fn quota_failures_are_absorbed() {
        let store = ContentStore::new(KvStore::memory_with_quota(16), Duration::ZERO);
        store.set("k", &doc("far too long to fit in the quota")).await;
        assert_eq!(store.raw("k").await, None);
        // The read still resolves with the default even though seeding fails.
        assert_eq!(store.get("k", doc("d")).await, doc("d"));
    }

    #[tokio::test]
    async fn fingerprint_tracks_stored_bytes() {
        let store = ContentStore::in_memory();
        assert_eq!(store.fingerprint("k").await, None);
        store.set("k", &doc("one")).await;
        let first = store.fingerprint("k").await.expect("stored");
        assert_eq!(first.len(), 64);
        store.set("k", &doc("one")).await;
        assert_eq!(store.fingerprint("k").await.as_deref(), Some(first.as_str()));
        store.set("k", &doc("two")).await;
        assert_ne!(store.fingerprint("k").await.as_deref(), Some(first.as_str()));
    }

    #[tokio::test]
    async fn latency_is_applied() {
        let store = ContentStore::new(KvStore::memory(), Duration::from_millis(20));
        let start = std::time::Instant::now();
        store.set("k", &doc("x")).await;
        let _ = store.get("k", doc("y")).await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
