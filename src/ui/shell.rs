use anyhow::Result;

use crate::usecases::{
    context::AppContext,
    contracts::{AppEventSource, DialogsOrchestrator},
};

/// Mounts the orchestrator and pumps events into it until it stops.
pub fn start(
    context: &AppContext,
    event_source: &mut dyn AppEventSource,
    orchestrator: &mut dyn DialogsOrchestrator,
) -> Result<()> {
    tracing::info!(
        log_level = %context.config.logging.level,
        archive_panel_height = context.config.dialogs.archive_panel_height,
        cache_enabled = context.config.cache.enabled,
        "starting dialogs shell"
    );

    orchestrator.mount();

    while orchestrator.state().is_running() {
        if let Some(event) = event_source.next_event()? {
            orchestrator.handle_event(event);
        }
    }

    Ok(())
}
