use std::sync::{mpsc::Sender, Arc};

use tokio::{
    runtime::{Handle, Runtime},
    sync::mpsc::{self, UnboundedSender},
    task::JoinHandle,
};

use crate::{
    domain::{events::AppEvent, snapshot::Snapshot},
    infra::contracts::SnapshotStore,
    usecases::contracts::SnapshotCache,
};

const SNAPSHOT_LOAD_FAILED: &str = "SNAPSHOT_CACHE_LOAD_FAILED";
const SNAPSHOT_SAVE_FAILED: &str = "SNAPSHOT_CACHE_SAVE_FAILED";
const SNAPSHOT_EVENT_SEND_FAILED: &str = "SNAPSHOT_CACHE_EVENT_SEND_FAILED";
const SNAPSHOT_WRITER_STOPPED: &str = "SNAPSHOT_CACHE_WRITER_STOPPED";

/// Runs snapshot I/O on the background runtime.
///
/// Loads report back through the app event channel. Saves go through a single
/// writer task, so they land in the order they were issued.
pub struct BackgroundSnapshotCache<S: SnapshotStore> {
    store: Arc<S>,
    runtime: Handle,
    events: Sender<AppEvent>,
    save_tx: UnboundedSender<Snapshot>,
}

/// Owns the writer task; [`SnapshotWriter::finish`] waits for queued saves.
#[derive(Debug)]
pub struct SnapshotWriter {
    handle: JoinHandle<()>,
}

impl<S: SnapshotStore> BackgroundSnapshotCache<S> {
    pub fn start(
        runtime: &Runtime,
        store: Arc<S>,
        events: Sender<AppEvent>,
    ) -> (Self, SnapshotWriter) {
        let (save_tx, mut save_rx) = mpsc::unbounded_channel::<Snapshot>();
        let writer_store = Arc::clone(&store);

        let handle = runtime.spawn(async move {
            while let Some(snapshot) = save_rx.recv().await {
                let store = Arc::clone(&writer_store);
                let main = snapshot.main_chat_ids.len();
                let archive = snapshot.archive_chat_ids.len();

                match tokio::task::spawn_blocking(move || store.save(&snapshot)).await {
                    Ok(Ok(())) => {
                        tracing::debug!(main, archive, "dialogs snapshot saved");
                    }
                    Ok(Err(error)) => {
                        tracing::warn!(
                            code = SNAPSHOT_SAVE_FAILED,
                            error = %error,
                            "dialogs snapshot save failed; next save will retry"
                        );
                    }
                    Err(error) => {
                        tracing::warn!(
                            code = SNAPSHOT_SAVE_FAILED,
                            error = %error,
                            "dialogs snapshot save task aborted"
                        );
                    }
                }
            }

            tracing::debug!(code = SNAPSHOT_WRITER_STOPPED, "snapshot writer drained");
        });

        let cache = Self {
            store,
            runtime: runtime.handle().clone(),
            events,
            save_tx,
        };

        (cache, SnapshotWriter { handle })
    }
}

impl<S: SnapshotStore> SnapshotCache for BackgroundSnapshotCache<S> {
    fn begin_load(&mut self) {
        let store = Arc::clone(&self.store);
        let events = self.events.clone();

        self.runtime.spawn_blocking(move || {
            let snapshot = store.load().unwrap_or_else(|error| {
                tracing::warn!(
                    code = SNAPSHOT_LOAD_FAILED,
                    error = %error,
                    "dialogs snapshot unusable; starting cold"
                );
                None
            });

            if events.send(AppEvent::CacheLoaded(snapshot)).is_err() {
                tracing::debug!(
                    code = SNAPSHOT_EVENT_SEND_FAILED,
                    "event loop gone before snapshot load finished"
                );
            }
        });
    }

    fn save(&mut self, snapshot: Snapshot) {
        if self.save_tx.send(snapshot).is_err() {
            tracing::warn!(
                code = SNAPSHOT_SAVE_FAILED,
                "snapshot writer is not running; save dropped"
            );
        }
    }
}

impl SnapshotWriter {
    /// Blocks until every save issued before the cache was dropped is written.
    pub fn finish(self, runtime: &Runtime) {
        if let Err(error) = runtime.block_on(self.handle) {
            tracing::warn!(
                code = SNAPSHOT_SAVE_FAILED,
                error = %error,
                "snapshot writer ended abnormally"
            );
        }
    }
}

/// Cache used when persistence is switched off: always a cold start.
#[derive(Debug)]
pub struct DisabledSnapshotCache {
    events: Sender<AppEvent>,
}

impl DisabledSnapshotCache {
    pub fn new(events: Sender<AppEvent>) -> Self {
        Self { events }
    }
}

impl SnapshotCache for DisabledSnapshotCache {
    fn begin_load(&mut self) {
        if self.events.send(AppEvent::CacheLoaded(None)).is_err() {
            tracing::debug!(
                code = SNAPSHOT_EVENT_SEND_FAILED,
                "event loop gone before cold start was reported"
            );
        }
    }

    fn save(&mut self, _snapshot: Snapshot) {}
}
