use serde::Deserialize;

use crate::{
    domain::chat::{ChatId, ChatList, MessageId},
    infra::error::AppError,
    telegram::chat_store::StoreUpdate,
};

/// One line of a replay script: a chat store change or a UI/pane action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Store(StoreUpdate),
    Ui(UiStep),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiStep {
    PaneLoading {
        list: ChatList,
    },
    /// The pane finished loading and shows the store's current members.
    PaneLoaded {
        list: ChatList,
    },
    PaneScrolled {
        list: ChatList,
        offset: u32,
    },
    SaveCache,
    OpenArchive,
    CloseArchive,
    HeaderClick,
    Search {
        #[serde(default)]
        chat_id: Option<ChatId>,
        query: String,
    },
    SearchText {
        text: String,
    },
    SearchToggle {
        open: bool,
    },
    SelectResult {
        chat_id: ChatId,
        #[serde(default)]
        message_id: Option<MessageId>,
        #[serde(default)]
        keep_open: bool,
    },
    CloseSearch,
    ChatDetails {
        visible: bool,
    },
    ThemeChanged,
    Quit,
}

/// Parses JSON lines, skipping blank lines and `#` comments.
pub fn parse_script(raw: &str) -> Result<Vec<ScriptStep>, AppError> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| AppError::ScriptParse {
                line: index + 1,
                source,
            })
        })
        .collect()
}
