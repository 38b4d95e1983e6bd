use wortschatz_core::Collation;

use crate::command::Command;
use crate::editor::Editor;
use crate::state::AppState;
use crate::ui;

/// File operations and settings changes; every change is written to the
/// settings file right away
pub async fn handle_file<C: Collation + Clone>(
    state: &AppState,
    editor: &mut Editor<C>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::New => {
            let unsaved = save_pending(editor)?;
            editor.new_dictionary();
            report_discarded(unsaved);
            state
                .update_config(|c| c.storage.last_save_path = None)
                .await;
            ui::print_message("Started a new dictionary");
        }
        Command::Open(path) => {
            let unsaved = save_pending(editor)?;
            // A failed open keeps the current dictionary, changes included
            let count = editor.open(&path)?;
            report_discarded(unsaved);
            state
                .update_config(|c| c.storage.last_save_path = Some(path.clone()))
                .await;
            ui::print_message(format!("Opened {} ({} words)", path.display(), count));
        }
        Command::Save(path) => {
            let saved = match path {
                Some(path) => editor.save_as(&path)?,
                None => editor.save()?,
            };
            state
                .update_config(|c| c.storage.last_save_path = Some(saved.clone()))
                .await;
            ui::print_message(format!("Saved to {}", saved.display()));
        }
        Command::Export(path) => {
            editor.export(&path)?;
            ui::print_message(format!("Exported to {}", path.display()));
        }
        Command::Lang(language) => {
            state.update_config(|c| c.ui.language = language).await;
            ui::print_message(format!("Language: {}", language.as_str()));
        }
        Command::Autosave(secs) => {
            state
                .update_config(|c| c.autosave.interval_secs = secs)
                .await;
            if secs == 0 {
                ui::print_message("Autosave off");
            } else {
                ui::print_message(format!("Autosave every {} seconds", secs));
            }
        }
        Command::AutoOpen(enabled) => {
            state
                .update_config(|c| c.storage.open_automatically = enabled)
                .await;
            ui::print_message(format!(
                "Open last dictionary on start: {}",
                if enabled { "on" } else { "off" }
            ));
        }
        other => tracing::warn!("Not a file command: {:?}", other),
    }

    Ok(())
}

/// Timer tick: save if there is somewhere to save to
pub fn handle_autosave<C: Collation + Clone>(editor: &mut Editor<C>) {
    match editor.autosave() {
        Ok(Some(path)) => tracing::info!("Autosaved to {}", path.display()),
        Ok(None) => tracing::debug!("Autosave: nothing to do"),
        Err(e) => {
            tracing::error!("Autosave failed: {}", e);
            ui::print_error(format!("Autosave failed: {}", e));
        }
    }
}

/// Save pending changes before the dictionary is replaced
///
/// Returns true if there are changes with no location to save them to.
pub(crate) fn save_pending<C: Collation + Clone>(
    editor: &mut Editor<C>,
) -> anyhow::Result<bool> {
    if !editor.save_required() {
        return Ok(false);
    }

    match editor.autosave()? {
        Some(path) => {
            ui::print_message(format!("Saved changes to {}", path.display()));
            Ok(false)
        }
        None => Ok(true),
    }
}

fn report_discarded(unsaved: bool) {
    if unsaved {
        ui::print_error("Unsaved changes discarded (no save location)");
    }
}
