//! Background Cache Write
//!
//! Stores a network response without holding up the response itself.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{RequestKey, SharedStorage};
use crate::network::FetchResponse;

/// Spawns a task that writes a response copy into the named region.
///
/// The caller is free to drop the returned handle: the write still lands,
/// just at some point after the original response has been returned, and a
/// failed write is logged from inside the task. Await the handle when a
/// subsequent lookup must observe the entry.
///
/// # Arguments
/// * `storage` - Shared cache storage
/// * `region` - Name of the region to write into
/// * `key` - Request identity to store under
/// * `response` - Structural copy of the response being returned
///
/// # Example
/// ```ignore
/// let handle = spawn_cache_write(storage.clone(), "retro-chat-v1".into(), key, response.clone());
/// // Later, when the entry must be visible:
/// handle.await?;
/// ```
pub fn spawn_cache_write(
    storage: SharedStorage,
    region: String,
    key: RequestKey,
    response: FetchResponse,
) -> JoinHandle<()> {
    let url = key.url.clone();
    let write = tokio::spawn(async move {
        debug!("Caching new resource: {}", key.url);
        let mut storage_guard = storage.write().await;
        storage_guard.put(&region, key, response);
    });

    tokio::spawn(async move {
        watch_write(&url, write).await;
    })
}

/// Waits for a write task and logs it if it did not complete.
///
/// Returns whether the write landed.
async fn watch_write(url: &str, write: JoinHandle<()>) -> bool {
    match write.await {
        Ok(()) => true,
        Err(e) => {
            warn!("Cache write for {} failed: {}", url, e);
            false
        }
    }
}
