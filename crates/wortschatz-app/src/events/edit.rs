use wortschatz_core::Collation;

use crate::command::Command;
use crate::editor::Editor;
use crate::ui;

/// Word edits and filter changes
pub fn handle_edit<C: Collation + Clone>(
    editor: &mut Editor<C>,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Add(word) => {
            editor.insert(&word)?;
            ui::print_message(format!("Added \"{}\"", word.trim()));
        }
        Command::Remove(word) => {
            let removed = editor.remove(&word)?;
            ui::print_message(format!("Removed \"{}\"", removed.headword()));
        }
        Command::Translate { word, translation } => {
            editor.translate(&word, &translation)?;
        }
        Command::Find(text) => {
            editor.set_search_text(&text);
            show(editor);
        }
        Command::Type(word_type) => {
            editor.set_word_type(word_type);
            show(editor);
        }
        Command::By { translation } => {
            editor.set_match_translation(translation);
            show(editor);
        }
        Command::List => show(editor),
        other => tracing::warn!("Not an edit command: {:?}", other),
    }

    Ok(())
}

fn show<C: Collation + Clone>(editor: &mut Editor<C>) {
    let params = editor.filter().clone();
    let total = editor.index().len();
    ui::print_message(ui::render_view(editor.visible(), &params, total));
}
