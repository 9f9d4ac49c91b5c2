use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain,
    infra::{self, contracts::SnapshotStore, error::AppError, snapshot_store::FileSnapshotStore},
    telegram::{self, chat_store::ChatStore},
    ui::{self, event_source::ScriptEventSource, script::parse_script, view},
    usecases::{
        self,
        bootstrap::{self, DialogsShell},
        context::AppContext,
        contracts::DialogsOrchestrator,
        dialogs::Panes,
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        telegram = telegram::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    match cli.command_or_default() {
        Command::Run { script } => {
            let raw = read_script(script.as_deref())?;
            for line in replay(&context, &raw)? {
                println!("{line}");
            }
        }
        Command::ShowCache => {
            let store = FileSnapshotStore::new(&context.snapshot_path);
            match store.load()? {
                Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                None => println!("No dialogs snapshot at {}.", store.path().display()),
            }
        }
        Command::ClearCache => {
            let removed = FileSnapshotStore::new(&context.snapshot_path).clear()?;
            tracing::info!(removed, "dialogs snapshot cleared");
            println!("Dialogs snapshot cleared. Next start will be a cold start.");
        }
    }

    Ok(())
}

fn read_script(path: Option<&Path>) -> Result<String, AppError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(AppError::ScriptRead),
        None => {
            let mut raw = String::new();
            io::stdin()
                .read_to_string(&mut raw)
                .map_err(AppError::ScriptRead)?;
            Ok(raw)
        }
    }
}

/// Runs a script to completion and returns the final report.
///
/// Queued snapshot saves are flushed before returning.
fn replay(context: &AppContext, raw: &str) -> Result<Vec<String>> {
    let steps = parse_script(raw)?;
    let runtime = bootstrap::build_runtime()?;

    let DialogsShell {
        mut orchestrator,
        store,
        panes,
        host,
        updates,
        events,
        writer,
    } = bootstrap::compose_dialogs(context, &runtime, ChatStore::new());

    let mut source =
        ScriptEventSource::new(steps, store.clone(), panes.clone(), updates, events);
    ui::shell::start(context, &mut source, &mut orchestrator)?;

    let report = view::render(
        orchestrator.state(),
        &Panes::new(panes.main.state(), panes.archive.state()),
        &store,
        &host.activity(),
    );

    drop(orchestrator);
    if let Some(writer) = writer {
        writer.finish(&runtime);
    }

    Ok(report)
}
