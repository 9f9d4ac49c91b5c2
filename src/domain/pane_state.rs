use super::{
    chat::{ChatId, ChatList},
    events::PaneEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneUiState {
    Loading,
    Ready,
    Empty,
}

/// One dialog list pane: its load state, resolved order and viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneState {
    list: ChatList,
    ui_state: PaneUiState,
    chat_ids: Vec<ChatId>,
    cache_hint: Option<Vec<ChatId>>,
    scroll_top: u32,
    open: bool,
}

impl PaneState {
    /// New panes start loading; the main pane is always open.
    pub fn new(list: ChatList) -> Self {
        Self {
            list,
            ui_state: PaneUiState::Loading,
            chat_ids: Vec::new(),
            cache_hint: None,
            scroll_top: 0,
            open: list == ChatList::Main,
        }
    }

    pub fn list(&self) -> ChatList {
        self.list
    }

    pub fn ui_state(&self) -> PaneUiState {
        self.ui_state
    }

    pub fn is_loading(&self) -> bool {
        self.ui_state == PaneUiState::Loading
    }

    pub fn chat_ids(&self) -> &[ChatId] {
        &self.chat_ids
    }

    pub fn cache_hint(&self) -> Option<&[ChatId]> {
        self.cache_hint.as_deref()
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Ids to draw: live data once loaded, otherwise the cache hint.
    pub fn visible_ids(&self) -> &[ChatId] {
        match (self.ui_state, self.cache_hint.as_deref()) {
            (PaneUiState::Loading, Some(hint)) => hint,
            _ => &self.chat_ids,
        }
    }

    pub fn apply(&mut self, event: PaneEvent) {
        match event {
            PaneEvent::LoadStarted => self.set_loading(),
            PaneEvent::Loaded(chat_ids) => self.set_ready(chat_ids),
            PaneEvent::Scrolled(offset) => self.scroll_top = offset,
        }
    }

    /// Starting a reload keeps the previous ids around as provisional data.
    pub fn set_loading(&mut self) {
        self.ui_state = PaneUiState::Loading;
    }

    pub fn set_ready(&mut self, chat_ids: Vec<ChatId>) {
        self.ui_state = if chat_ids.is_empty() {
            PaneUiState::Empty
        } else {
            PaneUiState::Ready
        };
        self.chat_ids = chat_ids;
    }

    pub fn set_cache_hint(&mut self, chat_ids: Option<Vec<ChatId>>) {
        self.cache_hint = chat_ids;
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn scroll_by(&mut self, delta: u32) {
        self.scroll_top = self.scroll_top.saturating_add(delta);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_top = 0;
    }
}
