use std::{
    path::{Path, PathBuf},
    sync::{
        mpsc::{self, Receiver},
        Arc,
    },
};

use tokio::runtime::Runtime;

use crate::{
    domain::{
        chat::ChatList,
        events::{AppEvent, ChatUpdate},
    },
    infra::{
        self,
        config::AppConfig,
        error::AppError,
        snapshot_cache::{BackgroundSnapshotCache, DisabledSnapshotCache, SnapshotWriter},
        snapshot_store::FileSnapshotStore,
        storage_layout::StorageLayout,
    },
    telegram::{chat_store::ChatStore, host::ChannelDialogsHost},
    ui::pane::PaneHandle,
    usecases::{
        context::AppContext,
        contracts::SnapshotCache,
        dialogs::{DefaultDialogsOrchestrator, Panes},
    },
};

pub type AppOrchestrator = DefaultDialogsOrchestrator<
    PaneHandle,
    ChatStore,
    Box<dyn SnapshotCache>,
    ChannelDialogsHost,
>;

/// Everything the shell needs for one run.
pub struct DialogsShell {
    pub orchestrator: AppOrchestrator,
    pub store: ChatStore,
    /// View-side handles to the panes the orchestrator also sees.
    pub panes: Panes<PaneHandle>,
    pub host: ChannelDialogsHost,
    pub updates: Receiver<ChatUpdate>,
    pub events: Receiver<AppEvent>,
    pub writer: Option<SnapshotWriter>,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let context = build_context(config_path)?;
    infra::logging::init(&context.config.logging)?;

    Ok(context)
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = infra::config::load(config_path)?;
    let snapshot_path = resolve_snapshot_path(&config)?;

    Ok(AppContext::new(config, snapshot_path))
}

fn resolve_snapshot_path(config: &AppConfig) -> Result<PathBuf, AppError> {
    match &config.cache.path {
        Some(path) => Ok(path.clone()),
        None => {
            let layout = StorageLayout::resolve()?;
            layout.ensure_dirs()?;
            Ok(layout.snapshot_file())
        }
    }
}

pub fn build_runtime() -> Result<Runtime, AppError> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("rtg-dialogs-io")
        .build()
        .map_err(AppError::RuntimeStart)
}

/// Wires the store, panes, cache and host around a fresh orchestrator.
pub fn compose_dialogs(
    context: &AppContext,
    runtime: &Runtime,
    store: ChatStore,
) -> DialogsShell {
    let (event_tx, events) = mpsc::channel();
    let updates = store.subscribe();

    let (cache, writer): (Box<dyn SnapshotCache>, Option<SnapshotWriter>) =
        if context.config.cache.enabled {
            let snapshot_store = Arc::new(FileSnapshotStore::new(&context.snapshot_path));
            let (cache, writer) =
                BackgroundSnapshotCache::start(runtime, snapshot_store, event_tx.clone());
            (Box::new(cache), Some(writer))
        } else {
            (Box::new(DisabledSnapshotCache::new(event_tx.clone())), None)
        };

    let host = ChannelDialogsHost::new(store.clone(), event_tx);
    let panes = Panes::new(
        PaneHandle::new(ChatList::Main),
        PaneHandle::new(ChatList::Archive),
    );
    let orchestrator = DefaultDialogsOrchestrator::new(
        panes.clone(),
        store.clone(),
        cache,
        host.clone(),
        context.config.dialogs.archive_panel_height,
    );

    DialogsShell {
        orchestrator,
        store,
        panes,
        host,
        updates,
        events,
        writer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let _guard = crate::test_support::env_lock();
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let old_xdg = std::env::var_os("XDG_CONFIG_HOME");
        // SAFETY: env is guarded by process-wide test mutex.
        unsafe { std::env::set_var("XDG_CONFIG_HOME", dir.path()) };

        let context = build_context(Some(Path::new("./missing-config.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, AppConfig::default());
        assert_eq!(
            context.snapshot_path,
            dir.path().join("rtg-dialogs/cache/dialogs.json")
        );
        assert!(dir.path().join("rtg-dialogs/cache").is_dir());

        match old_xdg {
            // SAFETY: restoring env while guard is held.
            Some(value) => unsafe { std::env::set_var("XDG_CONFIG_HOME", value) },
            // SAFETY: restoring env while guard is held.
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }
    }

    #[test]
    fn configured_cache_path_wins_over_layout() {
        let mut config = AppConfig::default();
        config.cache.path = Some(PathBuf::from("/tmp/custom.json"));

        let path = resolve_snapshot_path(&config).expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/custom.json"));
    }
}
