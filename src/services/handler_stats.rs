use std::sync::Arc;
use tokio::sync::RwLock;

use crate::message::HandlerStatsData;

/// Counts how `/example` work ended: ran to completion or was cut short by a disconnect.
#[derive(Debug, Clone)]
pub struct HandlerStats {
    inner: Arc<RwLock<HandlerStatsData>>,
}

impl Default for HandlerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerStats {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HandlerStatsData { completed: 0, cancelled: 0 })),
        }
    }

    pub async fn record_completed(&self) {
        self.inner.write().await.completed += 1;
    }

    pub async fn record_cancelled(&self) {
        self.inner.write().await.cancelled += 1;
    }

    pub async fn get_stats(&self) -> HandlerStatsData {
        self.inner.read().await.clone()
    }
}
