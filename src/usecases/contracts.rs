use anyhow::Result;

use crate::domain::{
    chat::{ChatId, ChatList, MessageId},
    dialogs_state::DialogsState,
    events::AppEvent,
    snapshot::Snapshot,
};

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait DialogsOrchestrator {
    fn state(&self) -> &DialogsState;
    /// Starts the one-time snapshot load. Later calls do nothing.
    fn mount(&mut self);
    fn handle_event(&mut self, event: AppEvent);
}

/// Read-only status a pane exposes plus the render commands it accepts.
///
/// Loading and resolving the list stays with the pane's own view.
pub trait PaneController {
    fn is_loading(&self) -> bool;
    /// Current resolved order, provisional while loading.
    fn snapshot_ids(&self) -> Vec<ChatId>;
    fn scroll_top(&self) -> u32;

    fn set_cache_hint(&mut self, chat_ids: Option<Vec<ChatId>>);
    fn set_open(&mut self, open: bool);
    fn scroll_by(&mut self, delta: u32);
    fn scroll_to_top(&mut self);
}

/// Chat list membership as known by the chat store.
pub trait ChatListSource {
    fn is_in_list(&self, list: ChatList, chat_id: ChatId) -> bool;
    fn list_members(&self, list: ChatList) -> Vec<ChatId>;
    fn archive_title(&self) -> Option<String>;
}

/// Snapshot persistence. Both calls return immediately; a load completes
/// later as [`AppEvent::CacheLoaded`].
pub trait SnapshotCache {
    fn begin_load(&mut self);
    fn save(&mut self, snapshot: Snapshot);
}

impl<T: SnapshotCache + ?Sized> SnapshotCache for Box<T> {
    fn begin_load(&mut self) {
        (**self).begin_load();
    }

    fn save(&mut self, snapshot: Snapshot) {
        (**self).save(snapshot);
    }
}

/// Requests from the dialogs core to the rest of the application.
pub trait DialogsHost {
    fn open_chat(&mut self, chat_id: ChatId, message_id: Option<MessageId>) -> Result<()>;
    fn close_archive(&mut self) -> Result<()>;
    fn apply_search_query(&mut self, query: &str) -> Result<()>;
    fn prefetch_chat_contents(&mut self, chat_ids: &[ChatId]) -> Result<()>;
    fn cache_loaded(&mut self) -> Result<()>;
}
