use super::{
    chat::{ChatId, MessageId},
    snapshot::Snapshot,
};

/// Side effect requested by a state transition.
///
/// Transitions are pure; the orchestrator commits the new state first and then
/// performs effects in the order they were produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the application to focus a chat, optionally at a message.
    OpenChat {
        chat_id: ChatId,
        message_id: Option<MessageId>,
    },
    /// Tell the application the archive view must be dismissed.
    CloseArchive,
    /// Open or close the archive pane.
    SetArchiveOpen(bool),
    /// Shift the main pane's scroll offset down by the given amount.
    ScrollMainBy(u32),
    ScrollMainToTop,
    /// Push an initial query into the header search input.
    ApplySearchQuery(String),
    /// Give each pane the ids to render until live data arrives.
    SeedPanes {
        main: Option<Vec<ChatId>>,
        archive: Option<Vec<ChatId>>,
    },
    PrefetchContent(Vec<ChatId>),
    NotifyCacheLoaded,
    SaveSnapshot(Snapshot),
}
