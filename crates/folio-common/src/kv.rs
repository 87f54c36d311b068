/// Local key-value persistence with graceful degradation.
///
/// All operations return `Option<T>` or `bool`. On any backend error the operation
/// logs a warning and returns `None`/`false`; nothing is surfaced to the caller.
///
/// Backends:
/// - Redis (`REDIS_URL`), one string value per key
/// - a directory holding one `<key>.json` file per key
/// - process memory, optionally with a byte quota
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use redis::AsyncCommands;
use tokio::sync::RwLock;
use tracing::warn;

#[derive(Clone)]
pub struct KvStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Redis(redis::Client),
    Directory(PathBuf),
    Memory(Arc<MemoryMap>),
}

struct MemoryMap {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl KvStore {
    /// Build a Redis-backed store. Returns `None` if the URL cannot be parsed.
    pub fn redis(url: &str) -> Option<Self> {
        let client = redis::Client::open(url)
            .inspect_err(|e| warn!(error = %e, url, "failed to create redis client"))
            .ok()?;
        Some(Self {
            backend: Backend::Redis(client),
        })
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: Backend::Directory(path.into()),
        }
    }

    pub fn memory() -> Self {
        Self::memory_map(None)
    }

    /// Memory store that refuses writes once the total stored bytes would exceed `quota_bytes`.
    pub fn memory_with_quota(quota_bytes: usize) -> Self {
        Self::memory_map(Some(quota_bytes))
    }

    fn memory_map(quota_bytes: Option<usize>) -> Self {
        Self {
            backend: Backend::Memory(Arc::new(MemoryMap {
                entries: RwLock::new(HashMap::new()),
                quota_bytes,
            })),
        }
    }

    /// Short backend name for logs.
    pub fn kind(&self) -> &'static str {
        match &self.backend {
            Backend::Redis(_) => "redis",
            Backend::Directory(_) => "directory",
            Backend::Memory(_) => "memory",
        }
    }

    /// Redis: PING succeeds. Directory: the directory exists or can be created.
    pub async fn is_available(&self) -> bool {
        match &self.backend {
            Backend::Redis(client) => match client.get_multiplexed_async_connection().await {
                Ok(mut conn) => {
                    let result: Result<String, _> =
                        redis::cmd("PING").query_async(&mut conn).await;
                    result.is_ok()
                }
                Err(_) => false,
            },
            Backend::Directory(dir) => tokio::fs::create_dir_all(dir)
                .await
                .inspect_err(|e| warn!(error = %e, dir = %dir.display(), "data dir unusable"))
                .is_ok(),
            Backend::Memory(_) => true,
        }
    }

    /// Get the raw value for `key`. `None` if absent or the backend failed.
    pub async fn get(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Redis(client) => {
                let mut conn = client
                    .get_multiplexed_async_connection()
                    .await
                    .inspect_err(|e| warn!(error = %e, "redis connection failed"))
                    .ok()?;
                let value: Option<String> = conn
                    .get(key)
                    .await
                    .inspect_err(|e| warn!(error = %e, key, "redis GET failed"))
                    .ok()?;
                value
            }
            Backend::Directory(dir) => {
                let path = entry_path(dir, key)?;
                match tokio::fs::read_to_string(&path).await {
                    Ok(value) => Some(value),
                    Err(e) if e.kind() == ErrorKind::NotFound => None,
                    Err(e) => {
                        warn!(error = %e, path = %path.display(), "read failed");
                        None
                    }
                }
            }
            Backend::Memory(map) => map.entries.read().await.get(key).cloned(),
        }
    }

    /// Overwrite `key` with `value`. Returns `true` if the write landed.
    pub async fn set(&self, key: &str, value: &str) -> bool {
        match &self.backend {
            Backend::Redis(client) => {
                let Ok(mut conn) = client
                    .get_multiplexed_async_connection()
                    .await
                    .inspect_err(|e| warn!(error = %e, "redis connection failed"))
                else {
                    return false;
                };
                conn.set::<_, _, ()>(key, value)
                    .await
                    .inspect_err(|e| warn!(error = %e, key, "redis SET failed"))
                    .is_ok()
            }
            Backend::Directory(dir) => {
                let Some(path) = entry_path(dir, key) else {
                    return false;
                };
                write_atomic(dir, &path, value)
                    .await
                    .inspect_err(|e| warn!(error = %e, path = %path.display(), "write failed"))
                    .is_ok()
            }
            Backend::Memory(map) => {
                let mut entries = map.entries.write().await;
                if let Some(quota) = map.quota_bytes {
                    let others: usize = entries
                        .iter()
                        .filter(|(k, _)| k.as_str() != key)
                        .map(|(_, v)| v.len())
                        .sum();
                    if others + value.len() > quota {
                        warn!(key, quota, needed = others + value.len(), "storage quota exceeded");
                        return false;
                    }
                }
                entries.insert(key.to_string(), value.to_string());
                true
            }
        }
    }

    /// Delete `key`. Deleting a missing key counts as success.
    pub async fn delete(&self, key: &str) -> bool {
        match &self.backend {
            Backend::Redis(client) => {
                let Ok(mut conn) = client
                    .get_multiplexed_async_connection()
                    .await
                    .inspect_err(|e| warn!(error = %e, "redis connection failed"))
                else {
                    return false;
                };
                conn.del::<_, ()>(key)
                    .await
                    .inspect_err(|e| warn!(error = %e, key, "redis DEL failed"))
                    .is_ok()
            }
            Backend::Directory(dir) => {
                let Some(path) = entry_path(dir, key) else {
                    return false;
                };
                match tokio::fs::remove_file(&path).await {
                    Ok(()) => true,
                    Err(e) if e.kind() == ErrorKind::NotFound => true,
                    Err(e) => {
                        warn!(error = %e, path = %path.display(), "delete failed");
                        false
                    }
                }
            }
            Backend::Memory(map) => {
                map.entries.write().await.remove(key);
                true
            }
        }
    }
}

/// Keys map to file names, so anything that could escape the directory is refused.
fn entry_path(dir: &Path, key: &str) -> Option<PathBuf> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !key.starts_with('.');
    if !valid {
        warn!(key, "refusing key that is not a plain file name");
        return None;
    }
    Some(dir.join(format!("{key}.json")))
}

async fn write_atomic(dir: &Path, path: &Path, value: &str) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, value).await?;
    tokio::fs::rename(&tmp, path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_set_get_delete() {
        let kv = KvStore::memory();
        assert_eq!(kv.get("a").await, None);
        assert!(kv.set("a", "1").await);
        assert_eq!(kv.get("a").await.as_deref(), Some("1"));
        assert!(kv.delete("a").await);
        assert_eq!(kv.get("a").await, None);
    }

    #[tokio::test]
    async fn memory_quota_rejects_oversized_writes() {
        let kv = KvStore::memory_with_quota(8);
        assert!(kv.set("a", "1234").await);
        assert!(!kv.set("b", "12345").await);
        assert_eq!(kv.get("b").await, None);
        // Replacing a key only counts its new size.
        assert!(kv.set("a", "12345678").await);
    }

    #[tokio::test]
    async fn directory_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        let first = KvStore::directory(dir.path());
        assert!(first.is_available().await);
        assert!(first.set("portfolio-about", "{\"content\":\"hi\"}").await);

        let second = KvStore::directory(dir.path());
        assert_eq!(
            second.get("portfolio-about").await.as_deref(),
            Some("{\"content\":\"hi\"}")
        );
        assert!(second.delete("portfolio-about").await);
        assert!(second.delete("portfolio-about").await);
        assert_eq!(first.get("portfolio-about").await, None);
    }

    #[tokio::test]
    async fn directory_refuses_path_like_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let kv = KvStore::directory(dir.path());
        assert!(!kv.set("../escape", "x").await);
        assert!(!kv.set("", "x").await);
        assert_eq!(kv.get("a/b").await, None);
    }

    #[tokio::test]
    async fn unreachable_redis_degrades() {
        let kv = KvStore::redis("redis://127.0.0.1:1").expect("url parses");
        assert_eq!(kv.kind(), "redis");
        assert!(!kv.is_available().await);
        assert_eq!(kv.get("k").await, None);
        assert!(!kv.set("k", "v").await);
    }
}
