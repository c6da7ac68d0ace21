//! Event Hub
//!
//! 进程内广播：数据变更后推送给所有 SSE 订阅者。
//! 没有订阅者时发送失败是正常情况，直接忽略。

use shared::event::{EventKind, PortalEvent};
use tokio::sync::broadcast;

#[derive(Debug, Clone)]
pub struct EventHub {
    tx: broadcast::Sender<PortalEvent>,
}

impl EventHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn publish(&self, kind: EventKind) {
        let event = PortalEvent::new(kind);
        let receivers = self.tx.send(event).unwrap_or(0);
        tracing::debug!(event = %kind, receivers, "Portal event published");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
