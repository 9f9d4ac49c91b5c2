use super::{
    chat::{ChatId, MessageId},
    snapshot::Snapshot,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    QuitRequested,
    /// Completion of the one-time snapshot load; `None` on a cold start.
    CacheLoaded(Option<Snapshot>),
    Chat(ChatUpdate),
    /// A pane reports its list is stable enough to be snapshotted.
    SaveCacheRequested,
    ChatDetailsVisibilityChanged(bool),
    ThemeChanged,
    SearchRequested {
        chat_id: Option<ChatId>,
        query: String,
    },
    SearchTextChanged(String),
    SearchToggled(bool),
    SearchResultSelected {
        chat_id: ChatId,
        message_id: Option<MessageId>,
        keep_open: bool,
    },
    SearchClosed,
    HeaderClicked,
}

/// Event published by the chat store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatUpdate {
    /// A chat may have moved within its list without changing membership.
    OrderChanged {
        chat_id: ChatId,
        cause: OrderingCause,
    },
    /// A chat entered or left a named list.
    ChatListChanged { chat_id: ChatId },
    OpenArchiveRequested,
    CloseArchiveRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingCause {
    Draft,
    Pin,
    Sponsorship,
    LastMessage,
    ExplicitOrder,
}

impl OrderingCause {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pin => "pin",
            Self::Sponsorship => "sponsorship",
            Self::LastMessage => "last_message",
            Self::ExplicitOrder => "explicit_order",
        }
    }
}

/// Pane-local input, applied by the list view that owns the pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneEvent {
    LoadStarted,
    Loaded(Vec<ChatId>),
    Scrolled(u32),
}
