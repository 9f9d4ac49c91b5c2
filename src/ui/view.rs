use crate::{
    domain::{
        chat::{ChatId, ChatList, ChatSummary},
        dialogs_state::{CacheStatus, DialogsState},
        pane_state::{PaneState, PaneUiState},
        search_state::SearchSession,
    },
    telegram::{chat_store::ChatStore, host::HostActivity},
    usecases::dialogs::Panes,
};

/// Text report of the dialogs column after a run.
pub fn render(
    state: &DialogsState,
    panes: &Panes<PaneState>,
    store: &ChatStore,
    activity: &HostActivity,
) -> Vec<String> {
    let mut lines = vec![
        archive_line(state),
        pane_line(&panes.main, store),
        pane_line(&panes.archive, store),
        search_line(state.search()),
        cache_line(state.cache()),
    ];

    if !activity.opened_chats.is_empty() {
        let opened = activity
            .opened_chats
            .iter()
            .map(|(chat_id, message_id)| match message_id {
                Some(message_id) => format!("{chat_id}#{message_id}"),
                None => chat_id.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("opened: {opened}"));
    }

    lines.push(format!(
        "host: cache {}, prefetched {}, archive closes {}, search input {:?}",
        if activity.cache_loaded {
            "loaded"
        } else {
            "waiting"
        },
        activity.prefetched.len(),
        activity.archive_close_requests,
        activity.search_input.as_deref().unwrap_or_default()
    ));

    lines.push(format!(
        "layout: chat details {}, render epoch {}",
        if state.chat_details_visible() {
            "shown"
        } else {
            "hidden"
        },
        state.render_epoch()
    ));

    lines
}

fn archive_line(state: &DialogsState) -> String {
    let archive = state.archive();
    if !archive.visibility().is_visible() {
        return "archive: hidden".to_owned();
    }

    format!(
        "archive: visible \"{}\"{}",
        archive.title().unwrap_or_default(),
        if archive.is_open() { " (open)" } else { "" }
    )
}

fn pane_line(pane: &PaneState, store: &ChatStore) -> String {
    let name = match pane.list() {
        ChatList::Main => "main",
        ChatList::Archive => "archive",
    };
    let status = match pane.ui_state() {
        PaneUiState::Loading if pane.cache_hint().is_some() => "cached",
        PaneUiState::Loading => "loading",
        PaneUiState::Ready => "ready",
        PaneUiState::Empty => "empty",
    };

    format!(
        "{name} pane: {status}{}, scroll {}: {}",
        if pane.is_open() { "" } else { " (closed)" },
        pane.scroll_top(),
        chat_labels(pane.visible_ids(), store)
    )
}

fn chat_labels(chat_ids: &[ChatId], store: &ChatStore) -> String {
    if chat_ids.is_empty() {
        return "-".to_owned();
    }

    chat_ids
        .iter()
        .map(|chat_id| match store.chat(*chat_id) {
            Some(chat) => chat_label(&chat),
            None => chat_id.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn chat_label(chat: &ChatSummary) -> String {
    let mut label = format!("{} ({})", chat.title, chat.chat_id);
    match (&chat.draft, &chat.last_message_preview) {
        (Some(draft), _) => label.push_str(&format!(" [draft: {draft}]")),
        (None, Some(preview)) => label.push_str(&format!(" \"{preview}\"")),
        (None, None) => {}
    }
    label
}

fn search_line(search: &SearchSession) -> String {
    if !search.is_open() {
        return "search: closed".to_owned();
    }

    let scope = search
        .target()
        .map_or_else(|| "all chats".to_owned(), |chat_id| format!("chat {chat_id}"));
    format!("search: open in {scope}, text {:?}", search.text().unwrap_or_default())
}

fn cache_line(cache: &CacheStatus) -> String {
    match cache {
        CacheStatus::Pending => "cache: pending".to_owned(),
        CacheStatus::Loaded(None) => "cache: cold start".to_owned(),
        CacheStatus::Loaded(Some(snapshot)) => format!(
            "cache: restored {} main, {} archive",
            snapshot.main_chat_ids.len(),
            snapshot.archive_chat_ids.len()
        ),
    }
}
