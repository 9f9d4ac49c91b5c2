use crate::domain::{
    archive_state::MembershipInputs,
    chat::{ChatId, ChatList},
    dialogs_state::{CacheStatus, DialogsState},
    effects::Effect,
    events::{AppEvent, ChatUpdate, OrderingCause},
    snapshot::Snapshot,
};

use super::contracts::{
    ChatListSource, DialogsHost, DialogsOrchestrator, PaneController, SnapshotCache,
};

const STALE_UPDATE_IGNORED: &str = "DIALOGS_STALE_UPDATE_IGNORED";
const DUPLICATE_CACHE_LOAD_IGNORED: &str = "DIALOGS_DUPLICATE_CACHE_LOAD_IGNORED";
const HOST_REQUEST_FAILED: &str = "DIALOGS_HOST_REQUEST_FAILED";

/// The two list panes, addressed by the list they show.
#[derive(Debug, Clone)]
pub struct Panes<P> {
    pub main: P,
    pub archive: P,
}

impl<P: PaneController> Panes<P> {
    pub fn new(main: P, archive: P) -> Self {
        Self { main, archive }
    }

    fn any_loading(&self) -> bool {
        self.main.is_loading() || self.archive.is_loading()
    }
}

pub struct DefaultDialogsOrchestrator<P, L, C, H>
where
    P: PaneController,
    L: ChatListSource,
    C: SnapshotCache,
    H: DialogsHost,
{
    state: DialogsState,
    panes: Panes<P>,
    chats: L,
    cache: C,
    host: H,
    archive_panel_height: u32,
    mounted: bool,
}

impl<P, L, C, H> DefaultDialogsOrchestrator<P, L, C, H>
where
    P: PaneController,
    L: ChatListSource,
    C: SnapshotCache,
    H: DialogsHost,
{
    pub fn new(panes: Panes<P>, chats: L, cache: C, host: H, archive_panel_height: u32) -> Self {
        Self {
            state: DialogsState::default(),
            panes,
            chats,
            cache,
            host,
            archive_panel_height,
            mounted: false,
        }
    }

    fn on_cache_loaded(&mut self, snapshot: Option<Snapshot>) -> Vec<Effect> {
        if matches!(self.state.cache, CacheStatus::Loaded(_)) {
            tracing::warn!(
                code = DUPLICATE_CACHE_LOAD_IGNORED,
                "snapshot load completed twice; keeping the first result"
            );
            return Vec::new();
        }

        let snapshot = snapshot.map(Snapshot::bounded);
        let has_archive = snapshot.as_ref().is_some_and(Snapshot::has_archive);
        self.state.archive = self
            .state
            .archive
            .on_cache_loaded(has_archive, self.chats.archive_title());

        tracing::info!(
            cold_start = snapshot.is_none(),
            archive_visible = has_archive,
            "dialogs snapshot applied"
        );

        let mut effects = vec![Effect::SeedPanes {
            main: snapshot.as_ref().map(|s| s.main_chat_ids.clone()),
            archive: snapshot.as_ref().map(|s| s.archive_chat_ids.clone()),
        }];
        if let Some(snapshot) = &snapshot {
            effects.push(Effect::PrefetchContent(snapshot.main_chat_ids.clone()));
        }
        effects.push(Effect::NotifyCacheLoaded);

        self.state.cache = CacheStatus::Loaded(snapshot);
        effects
    }

    fn on_chat_update(&mut self, update: ChatUpdate) -> Vec<Effect> {
        match update {
            ChatUpdate::OrderChanged { chat_id, cause } => {
                self.on_order_changed(chat_id, cause);
                Vec::new()
            }
            ChatUpdate::ChatListChanged { chat_id } => self.on_chat_list_changed(chat_id),
            ChatUpdate::OpenArchiveRequested => self.set_archive_open(true),
            ChatUpdate::CloseArchiveRequested => self.set_archive_open(false),
        }
    }

    fn on_order_changed(&mut self, chat_id: ChatId, cause: OrderingCause) {
        if self.ignore_while_loading(chat_id, "order_changed") {
            return;
        }

        if !self.chats.is_in_list(ChatList::Archive, chat_id) {
            return;
        }

        tracing::debug!(
            chat_id,
            cause = cause.as_label(),
            "archived chat reordered; refreshing archive title"
        );
        self.state.archive = self
            .state
            .archive
            .on_ordering_changed(self.chats.archive_title());
    }

    fn on_chat_list_changed(&mut self, chat_id: ChatId) -> Vec<Effect> {
        if self.ignore_while_loading(chat_id, "chat_list_changed") {
            return Vec::new();
        }

        let inputs = MembershipInputs {
            archive_non_empty: !self.chats.list_members(ChatList::Archive).is_empty(),
            title: self.chats.archive_title(),
            main_scroll_top: self.panes.main.scroll_top(),
            panel_height: self.archive_panel_height,
        };

        let previous = self.state.archive.visibility();
        let (archive, effects) = self.state.archive.on_membership_changed(inputs);
        if archive.visibility() != previous {
            tracing::info!(
                chat_id,
                from = ?previous,
                to = ?archive.visibility(),
                "archive visibility changed"
            );
        }
        self.state.archive = archive;

        effects
    }

    fn set_archive_open(&mut self, open: bool) -> Vec<Effect> {
        let (archive, effects) = self.state.archive.on_open_changed(open);
        self.state.archive = archive;
        effects
    }

    fn ignore_while_loading(&self, chat_id: ChatId, update: &'static str) -> bool {
        if !self.panes.any_loading() {
            return false;
        }

        tracing::debug!(
            code = STALE_UPDATE_IGNORED,
            chat_id,
            update,
            main_loading = self.panes.main.is_loading(),
            archive_loading = self.panes.archive.is_loading(),
            "chat update ignored while a pane is loading"
        );
        true
    }

    fn on_header_clicked(&self) -> Vec<Effect> {
        if self.state.archive.is_open() {
            vec![Effect::CloseArchive]
        } else {
            vec![Effect::ScrollMainToTop]
        }
    }

    fn build_snapshot(&self) -> Snapshot {
        Snapshot::from_panes(
            &self.panes.main.snapshot_ids(),
            &self.panes.archive.snapshot_ids(),
        )
    }

    fn dispatch(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            let result = match effect {
                Effect::OpenChat {
                    chat_id,
                    message_id,
                } => self.host.open_chat(chat_id, message_id),
                Effect::CloseArchive => self.host.close_archive(),
                Effect::SetArchiveOpen(open) => {
                    self.panes.archive.set_open(open);
                    Ok(())
                }
                Effect::ScrollMainBy(delta) => {
                    self.panes.main.scroll_by(delta);
                    Ok(())
                }
                Effect::ScrollMainToTop => {
                    self.panes.main.scroll_to_top();
                    Ok(())
                }
                Effect::ApplySearchQuery(query) => self.host.apply_search_query(&query),
                Effect::SeedPanes { main, archive } => {
                    self.panes.main.set_cache_hint(main);
                    self.panes.archive.set_cache_hint(archive);
                    Ok(())
                }
                Effect::PrefetchContent(chat_ids) => self.host.prefetch_chat_contents(&chat_ids),
                Effect::NotifyCacheLoaded => self.host.cache_loaded(),
                Effect::SaveSnapshot(snapshot) => {
                    self.cache.save(snapshot);
                    Ok(())
                }
            };

            if let Err(error) = result {
                tracing::warn!(
                    code = HOST_REQUEST_FAILED,
                    error = ?error,
                    "host rejected a dialogs request"
                );
            }
        }
    }
}

impl<P, L, C, H> DialogsOrchestrator for DefaultDialogsOrchestrator<P, L, C, H>
where
    P: PaneController,
    L: ChatListSource,
    C: SnapshotCache,
    H: DialogsHost,
{
    fn state(&self) -> &DialogsState {
        &self.state
    }

    fn mount(&mut self) {
        if self.mounted {
            return;
        }

        self.mounted = true;
        self.cache.begin_load();
    }

    fn handle_event(&mut self, event: AppEvent) {
        let effects = match event {
            AppEvent::QuitRequested => {
                self.state.stop();
                Vec::new()
            }
            AppEvent::CacheLoaded(snapshot) => self.on_cache_loaded(snapshot),
            AppEvent::Chat(update) => self.on_chat_update(update),
            AppEvent::SaveCacheRequested => vec![Effect::SaveSnapshot(self.build_snapshot())],
            AppEvent::ChatDetailsVisibilityChanged(visible) => {
                self.state.chat_details_visible = visible;
                Vec::new()
            }
            AppEvent::ThemeChanged => {
                self.state.render_epoch = self.state.render_epoch.wrapping_add(1);
                Vec::new()
            }
            AppEvent::SearchRequested { chat_id, query } => {
                let (search, effects) = self.state.search.request(chat_id, &query);
                self.state.search = search;
                effects
            }
            AppEvent::SearchTextChanged(text) => {
                self.state.search = self.state.search.change_text(text);
                Vec::new()
            }
            AppEvent::SearchToggled(open) => {
                self.state.search = self.state.search.toggle(open);
                Vec::new()
            }
            AppEvent::SearchResultSelected {
                chat_id,
                message_id,
                keep_open,
            } => {
                let (search, effects) =
                    self.state.search.select_result(chat_id, message_id, keep_open);
                self.state.search = search;
                effects
            }
            AppEvent::SearchClosed => {
                self.state.search = self.state.search.close();
                Vec::new()
            }
            AppEvent::HeaderClicked => self.on_header_clicked(),
        };

        self.dispatch(effects);
    }
}
