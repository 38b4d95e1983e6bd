use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use wortschatz_core::Collation;

use crate::command::Command;
use crate::editor::Editor;
use crate::state::AppState;
use crate::ui;

pub mod edit;
pub mod files;

use edit::handle_edit;
use files::{handle_autosave, handle_file};

#[derive(Debug, Clone)]
pub enum AppEvent {
    Command(Command),
    /// Autosave timer fired
    Autosave,
    /// Input closed, save what can be saved and stop
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// App's main loop; the only place the dictionary is mutated
pub async fn event_loop<C: Collation + Clone>(
    state: Arc<AppState>,
    mut editor: Editor<C>,
    events_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = events_rx.recv() => event?,
        };
        tracing::debug!("[EVENT_LOOP] {:?}", event);

        match handle_event(&state, &mut editor, event).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) => ui::print_error(format!("{:#}", e)),
        }
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    cancel.cancel();
    Ok(())
}

pub async fn handle_event<C: Collation + Clone>(
    state: &AppState,
    editor: &mut Editor<C>,
    event: AppEvent,
) -> anyhow::Result<Flow> {
    match event {
        AppEvent::Command(Command::Help) => ui::print_help(),
        AppEvent::Command(Command::Quit { force }) => return quit(state, editor, force).await,
        AppEvent::Command(
            command @ (Command::New
            | Command::Open(_)
            | Command::Save(_)
            | Command::Export(_)
            | Command::Lang(_)
            | Command::Autosave(_)
            | Command::AutoOpen(_)),
        ) => handle_file(state, editor, command).await?,
        AppEvent::Command(command) => handle_edit(editor, command)?,
        AppEvent::Autosave => handle_autosave(editor),
        AppEvent::Shutdown => {
            handle_autosave(editor);
            if editor.save_required() {
                tracing::warn!("Input closed with unsaved changes and no save location");
            }
            return Ok(Flow::Quit);
        }
    }

    Ok(Flow::Continue)
}

async fn quit<C: Collation + Clone>(
    state: &AppState,
    editor: &mut Editor<C>,
    force: bool,
) -> anyhow::Result<Flow> {
    if editor.save_required() && !force {
        if editor.save_location().is_none() {
            anyhow::bail!("Unsaved changes: 'save <path>' first, or 'quit!' to discard them");
        }
        handle_file(state, editor, Command::Save(None)).await?;
    }
    Ok(Flow::Quit)
}
