//! Explicit like state per message.
//!
//! The page itself only records likes in icon classes. The ledger keeps the
//! state the handler last applied for each message, shared by every clone of
//! the handler.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use warbler_common::{LikeState, MessageId};

/// Shared `MessageId -> LikeState` map.
#[derive(Debug, Clone, Default)]
pub struct LikeLedger(Arc<RwLock<HashMap<MessageId, LikeState>>>);

impl LikeLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last applied state for `id`.
    pub async fn get(&self, id: &MessageId) -> Option<LikeState> {
        self.0.read().await.get(id).copied()
    }

    /// Record `state` for `id`, returning the previous state.
    pub async fn set(&self, id: MessageId, state: LikeState) -> Option<LikeState> {
        self.0.write().await.insert(id, state)
    }

    /// Number of messages tracked.
    pub async fn len(&self) -> usize {
        self.0.read().await.len()
    }

    /// True when no message has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.0.read().await.is_empty()
    }

    /// Copy of the whole map.
    pub async fn snapshot(&self) -> HashMap<MessageId, LikeState> {
        self.0.read().await.clone()
    }
}

#[cfg(all(test, not(target_family = "wasm")))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_returns_previous_state() {
        let ledger = LikeLedger::new();
        assert!(ledger.is_empty().await);

        let id = MessageId::new("5");
        assert_eq!(ledger.set(id.clone(), LikeState::Filled).await, None);
        assert_eq!(
            ledger.set(id.clone(), LikeState::Outline).await,
            Some(LikeState::Filled)
        );
        assert_eq!(ledger.get(&id).await, Some(LikeState::Outline));
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let ledger = LikeLedger::new();
        let other = ledger.clone();
        other.set(MessageId::new("1"), LikeState::Filled).await;
        assert_eq!(
            ledger.snapshot().await.get(&MessageId::new("1")),
            Some(&LikeState::Filled)
        );
    }
}
