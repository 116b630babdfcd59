//! Process-lifetime snapshot of the local neighbor (ARP) table.
//!
//! The table is queried exactly once, on first use, and the result is
//! shared by every record created afterwards. A failed query is
//! memoized the same way so it is never retried.

use std::sync::Arc;

use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Cheap-to-clone view of the captured table text.
#[derive(Debug, Clone)]
pub struct NeighborSnapshot(Arc<str>);

impl NeighborSnapshot {
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Handle to the captured text itself. Records created from the
    /// same cache share one allocation for the process lifetime.
    pub fn shared_text(&self) -> Arc<str> {
        self.0.clone()
    }

    /// Whether two handles share the same captured value.
    pub fn shares(&self, other: &NeighborSnapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Write-once holder for the snapshot. Constructed at scheduler start
/// and passed by shared reference into every session; the `OnceCell`
/// keeps the populate-once contract under concurrent access.
#[derive(Debug, Default)]
pub struct NeighborCache {
    cell: OnceCell<NeighborSnapshot>,
}

impl NeighborCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache whose snapshot is already decided. Used in tests and
    /// wherever the table text comes from elsewhere.
    pub fn preloaded(text: impl Into<String>) -> Self {
        let cell = OnceCell::new();
        cell.set(NeighborSnapshot(Arc::from(text.into())))
            .expect("fresh cell");
        Self { cell }
    }

    /// Returns the memoized snapshot, querying the neighbor table on
    /// the first call only.
    pub async fn snapshot(&self) -> NeighborSnapshot {
        self.cell.get_or_init(query_neighbor_table).await.clone()
    }
}

async fn query_neighbor_table() -> NeighborSnapshot {
    match Command::new("arp").arg("-a").output().await {
        Ok(output) => {
            let text = String::from_utf8_lossy(&output.stdout).into_owned();
            info!("captured neighbor table ({} bytes)", text.len());
            NeighborSnapshot(Arc::from(text))
        }
        Err(e) => {
            // Memoized like any other snapshot; the failure text shows
            // up in the records instead of being retried every host.
            warn!("neighbor table query failed: {e}");
            NeighborSnapshot(Arc::from(format!("neighbor table unavailable: {e}")))
        }
    }
}
