use serde::{Deserialize, Serialize};

pub type ChatId = i64;
pub type MessageId = i64;

/// Named chat list a chat can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatList {
    Main,
    Archive,
}

impl ChatList {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Main => "CHAT_LIST_MAIN",
            Self::Archive => "CHAT_LIST_ARCHIVE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSummary {
    pub chat_id: ChatId,
    pub title: String,
    pub unread_count: u32,
    /// List the chat currently belongs to, `None` when it is in no list.
    pub list: Option<ChatList>,
    /// Server-side order key, higher sorts first.
    pub order: i64,
    pub is_pinned: bool,
    pub is_sponsored: bool,
    pub draft: Option<String>,
    pub last_message_preview: Option<String>,
}

impl ChatSummary {
    pub fn new(chat_id: ChatId, title: impl Into<String>) -> Self {
        Self {
            chat_id,
            title: title.into(),
            unread_count: 0,
            list: None,
            order: 0,
            is_pinned: false,
            is_sponsored: false,
            draft: None,
            last_message_preview: None,
        }
    }
}

/// Sorts chats the way a dialog list shows them: sponsored and pinned first,
/// then by descending order key.
pub fn sort_for_display(chats: &mut [&ChatSummary]) {
    chats.sort_by(|left, right| {
        right
            .is_sponsored
            .cmp(&left.is_sponsored)
            .then(right.is_pinned.cmp(&left.is_pinned))
            .then(right.order.cmp(&left.order))
            .then(left.chat_id.cmp(&right.chat_id))
    });
}

/// Title of the archive entry shown at the top of the main list.
///
/// Lists archived chat titles in display order, prefixed by the number of
/// archived chats with unread messages when there are any.
pub fn archive_title(archived: &[&ChatSummary]) -> Option<String> {
    if archived.is_empty() {
        return None;
    }

    let names = archived
        .iter()
        .map(|chat| chat.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let unread = archived.iter().filter(|chat| chat.unread_count > 0).count();
    if unread == 0 {
        Some(names)
    } else {
        Some(format!("({unread}) {names}"))
    }
}
