use serde::{Deserialize, Serialize};

use super::chat::ChatId;

/// Maximum number of chat ids persisted per pane.
pub const MAX_SNAPSHOT_CHATS: usize = 25;

/// Persisted view of both panes used to render before live data arrives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub main_chat_ids: Vec<ChatId>,
    #[serde(default)]
    pub archive_chat_ids: Vec<ChatId>,
}

impl Snapshot {
    /// Builds a snapshot from the panes' current order, keeping the first
    /// [`MAX_SNAPSHOT_CHATS`] ids of each.
    pub fn from_panes(main: &[ChatId], archive: &[ChatId]) -> Self {
        Self {
            main_chat_ids: bounded(main),
            archive_chat_ids: bounded(archive),
        }
    }

    pub fn has_archive(&self) -> bool {
        !self.archive_chat_ids.is_empty()
    }

    /// Re-applies the per-pane bound to a snapshot read from untrusted storage.
    pub fn bounded(self) -> Self {
        Self::from_panes(&self.main_chat_ids, &self.archive_chat_ids)
    }
}

fn bounded(ids: &[ChatId]) -> Vec<ChatId> {
    ids.iter().take(MAX_SNAPSHOT_CHATS).copied().collect()
}
