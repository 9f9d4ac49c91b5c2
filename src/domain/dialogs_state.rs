use super::{archive_state::ArchiveState, search_state::SearchSession, snapshot::Snapshot};

/// Progress of the one-time startup snapshot load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CacheStatus {
    #[default]
    Pending,
    /// Load finished; `None` means there was nothing usable on disk.
    Loaded(Option<Snapshot>),
}

/// Everything the dialogs orchestrator owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogsState {
    running: bool,
    pub(crate) archive: ArchiveState,
    pub(crate) search: SearchSession,
    pub(crate) cache: CacheStatus,
    pub(crate) chat_details_visible: bool,
    pub(crate) render_epoch: u64,
}

impl Default for DialogsState {
    fn default() -> Self {
        Self {
            running: true,
            archive: ArchiveState::default(),
            search: SearchSession::default(),
            cache: CacheStatus::default(),
            chat_details_visible: false,
            render_epoch: 0,
        }
    }
}

impl DialogsState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn archive(&self) -> &ArchiveState {
        &self.archive
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn cache(&self) -> &CacheStatus {
        &self.cache
    }

    pub fn chat_details_visible(&self) -> bool {
        self.chat_details_visible
    }

    /// Bumped whenever the host must redraw without a state change.
    pub fn render_epoch(&self) -> u64 {
        self.render_epoch
    }
}
