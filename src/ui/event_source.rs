use std::{
    collections::VecDeque,
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Duration,
};

use anyhow::Result;

use crate::{
    domain::{
        chat::ChatList,
        events::{AppEvent, ChatUpdate, PaneEvent},
    },
    telegram::chat_store::ChatStore,
    usecases::{
        contracts::{AppEventSource, ChatListSource},
        dialogs::Panes,
    },
};

use super::{
    pane::PaneHandle,
    script::{ScriptStep, UiStep},
};

const CACHE_LOAD_TIMEOUT: Duration = Duration::from_secs(2);
const CACHE_LOAD_TIMED_OUT: &str = "SCRIPT_CACHE_LOAD_TIMED_OUT";

/// Feeds a replay script through the chat store, the panes and the app event
/// channel.
///
/// Pending app events and bus updates always go before the next script step,
/// and no step is played until the startup snapshot load has reported back.
pub struct ScriptEventSource {
    steps: VecDeque<ScriptStep>,
    store: ChatStore,
    panes: Panes<PaneHandle>,
    updates: Receiver<ChatUpdate>,
    events: Receiver<AppEvent>,
    awaiting_cache: bool,
}

impl ScriptEventSource {
    pub fn new(
        steps: Vec<ScriptStep>,
        store: ChatStore,
        panes: Panes<PaneHandle>,
        updates: Receiver<ChatUpdate>,
        events: Receiver<AppEvent>,
    ) -> Self {
        Self {
            steps: steps.into(),
            store,
            panes,
            updates,
            events,
            awaiting_cache: true,
        }
    }

    fn wait_for_cache(&mut self) -> Option<AppEvent> {
        match self.events.recv_timeout(CACHE_LOAD_TIMEOUT) {
            Ok(event) => {
                if matches!(event, AppEvent::CacheLoaded(_)) {
                    self.awaiting_cache = false;
                }
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    code = CACHE_LOAD_TIMED_OUT,
                    "snapshot load did not report back; replaying without it"
                );
                self.awaiting_cache = false;
                None
            }
            Err(RecvTimeoutError::Disconnected) => {
                self.awaiting_cache = false;
                None
            }
        }
    }

    fn play(&self, step: ScriptStep) -> Option<AppEvent> {
        let step = match step {
            ScriptStep::Store(update) => {
                self.store.apply(update);
                return None;
            }
            ScriptStep::Ui(step) => step,
        };

        let event = match step {
            UiStep::PaneLoading { list } => {
                self.drive_pane(list, PaneEvent::LoadStarted);
                return None;
            }
            UiStep::PaneLoaded { list } => {
                self.drive_pane(list, PaneEvent::Loaded(self.store.list_members(list)));
                return None;
            }
            UiStep::PaneScrolled { list, offset } => {
                self.drive_pane(list, PaneEvent::Scrolled(offset));
                return None;
            }
            UiStep::SaveCache => AppEvent::SaveCacheRequested,
            UiStep::OpenArchive => {
                self.store.publish(ChatUpdate::OpenArchiveRequested);
                return None;
            }
            UiStep::CloseArchive => {
                self.store.publish(ChatUpdate::CloseArchiveRequested);
                return None;
            }
            UiStep::HeaderClick => AppEvent::HeaderClicked,
            UiStep::Search { chat_id, query } => AppEvent::SearchRequested { chat_id, query },
            UiStep::SearchText { text } => AppEvent::SearchTextChanged(text),
            UiStep::SearchToggle { open } => AppEvent::SearchToggled(open),
            UiStep::SelectResult {
                chat_id,
                message_id,
                keep_open,
            } => AppEvent::SearchResultSelected {
                chat_id,
                message_id,
                keep_open,
            },
            UiStep::CloseSearch => AppEvent::SearchClosed,
            UiStep::ChatDetails { visible } => AppEvent::ChatDetailsVisibilityChanged(visible),
            UiStep::ThemeChanged => AppEvent::ThemeChanged,
            UiStep::Quit => AppEvent::QuitRequested,
        };

        Some(event)
    }

    fn drive_pane(&self, list: ChatList, event: PaneEvent) {
        tracing::debug!(list = list.as_label(), event = ?event, "pane event");
        let pane = match list {
            ChatList::Main => &self.panes.main,
            ChatList::Archive => &self.panes.archive,
        };
        pane.apply(event);
    }
}

impl AppEventSource for ScriptEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if self.awaiting_cache {
            return Ok(self.wait_for_cache());
        }

        if let Ok(event) = self.events.try_recv() {
            return Ok(Some(event));
        }

        if let Ok(update) = self.updates.try_recv() {
            return Ok(Some(AppEvent::Chat(update)));
        }

        match self.steps.pop_front() {
            Some(step) => Ok(self.play(step)),
            None => Ok(Some(AppEvent::QuitRequested)),
        }
    }
}

#[cfg(test)]
pub struct MockEventSource {
    queue: VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
