use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    domain::{
        chat::{ChatId, ChatList},
        events::PaneEvent,
        pane_state::PaneState,
    },
    usecases::contracts::PaneController,
};

impl PaneController for PaneState {
    fn is_loading(&self) -> bool {
        PaneState::is_loading(self)
    }

    fn snapshot_ids(&self) -> Vec<ChatId> {
        self.chat_ids().to_vec()
    }

    fn scroll_top(&self) -> u32 {
        PaneState::scroll_top(self)
    }

    fn set_cache_hint(&mut self, chat_ids: Option<Vec<ChatId>>) {
        PaneState::set_cache_hint(self, chat_ids);
    }

    fn set_open(&mut self, open: bool) {
        PaneState::set_open(self, open);
    }

    fn scroll_by(&mut self, delta: u32) {
        PaneState::scroll_by(self, delta);
    }

    fn scroll_to_top(&mut self) {
        PaneState::scroll_to_top(self);
    }
}

/// A pane shared between the list view that loads it and the orchestrator.
///
/// Only the view side applies [`PaneEvent`]s; the orchestrator sees the
/// handle through [`PaneController`] and cannot replace the resolved list.
#[derive(Debug, Clone)]
pub struct PaneHandle {
    inner: Arc<Mutex<PaneState>>,
}

impl PaneHandle {
    pub fn new(list: ChatList) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PaneState::new(list))),
        }
    }

    pub fn apply(&self, event: PaneEvent) {
        self.lock().apply(event);
    }

    /// Copy of the current pane state for rendering.
    pub fn state(&self) -> PaneState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PaneState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PaneController for PaneHandle {
    fn is_loading(&self) -> bool {
        self.lock().is_loading()
    }

    fn snapshot_ids(&self) -> Vec<ChatId> {
        self.lock().chat_ids().to_vec()
    }

    fn scroll_top(&self) -> u32 {
        self.lock().scroll_top()
    }

    fn set_cache_hint(&mut self, chat_ids: Option<Vec<ChatId>>) {
        self.lock().set_cache_hint(chat_ids);
    }

    fn set_open(&mut self, open: bool) {
        self.lock().set_open(open);
    }

    fn scroll_by(&mut self, delta: u32) {
        self.lock().scroll_by(delta);
    }

    fn scroll_to_top(&mut self) {
        self.lock().scroll_to_top();
    }
}
