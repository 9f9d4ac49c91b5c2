use std::sync::{mpsc::Sender, Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::{
    domain::{
        chat::{ChatId, MessageId},
        events::{AppEvent, ChatUpdate},
    },
    usecases::contracts::DialogsHost,
};

use super::chat_store::ChatStore;

/// What the host was asked to do, kept for the end-of-run report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostActivity {
    pub opened_chats: Vec<(ChatId, Option<MessageId>)>,
    pub prefetched: Vec<ChatId>,
    pub search_input: Option<String>,
    pub archive_close_requests: usize,
    pub cache_loaded: bool,
}

/// Host side of the dialogs core.
///
/// Archive-close requests go back out on the chat store bus and header input
/// changes come back in as app events, the same path a real header takes.
#[derive(Debug, Clone)]
pub struct ChannelDialogsHost {
    store: ChatStore,
    events: Sender<AppEvent>,
    activity: Arc<Mutex<HostActivity>>,
}

impl ChannelDialogsHost {
    pub fn new(store: ChatStore, events: Sender<AppEvent>) -> Self {
        Self {
            store,
            events,
            activity: Arc::default(),
        }
    }

    pub fn activity(&self) -> HostActivity {
        self.activity
            .lock()
            .map(|activity| activity.clone())
            .unwrap_or_default()
    }

    fn record<F>(&self, recorder: F)
    where
        F: FnOnce(&mut HostActivity),
    {
        if let Ok(mut activity) = self.activity.lock() {
            recorder(&mut activity);
        }
    }
}

impl DialogsHost for ChannelDialogsHost {
    fn open_chat(&mut self, chat_id: ChatId, message_id: Option<MessageId>) -> Result<()> {
        tracing::info!(chat_id, message_id, "open chat requested");
        self.record(|activity| activity.opened_chats.push((chat_id, message_id)));
        Ok(())
    }

    fn close_archive(&mut self) -> Result<()> {
        tracing::info!("archive close requested");
        self.record(|activity| activity.archive_close_requests += 1);
        self.store.publish(ChatUpdate::CloseArchiveRequested);
        Ok(())
    }

    fn apply_search_query(&mut self, query: &str) -> Result<()> {
        self.record(|activity| activity.search_input = Some(query.to_owned()));
        self.events
            .send(AppEvent::SearchTextChanged(query.to_owned()))
            .map_err(|_| anyhow!("event loop is closed"))
    }

    fn prefetch_chat_contents(&mut self, chat_ids: &[ChatId]) -> Result<()> {
        tracing::debug!(count = chat_ids.len(), "prefetching cached chat contents");
        self.record(|activity| activity.prefetched.extend_from_slice(chat_ids));
        Ok(())
    }

    fn cache_loaded(&mut self) -> Result<()> {
        tracing::info!("dialogs cache loaded");
        self.record(|activity| activity.cache_loaded = true);
        Ok(())
    }
}
