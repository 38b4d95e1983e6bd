use std::fmt::Display;

use wortschatz_core::{Collation, FilterParams, Projection};

const HELP: &str = "\
add <word>                  add a word (nouns with der/die/das)
rm <word>                   remove a word
tr <word> = <translation>   set a translation
find [text]                 filter by prefix (or translation substring)
type all|nouns|verbs|other  filter by word type
by word|translation         what 'find' matches against
ls                          list visible words
new | open <path> | save [path] | export <path>
lang english|serbian | autosave <secs> | auto-open on|off
quit | quit!                quit (quit! discards unsaved changes)";

pub fn print_help() {
    println!("{HELP}");
}

pub fn print_message(message: impl Display) {
    println!("{message}");
}

pub fn print_error(error: impl Display) {
    println!("! {error}");
}

/// Render the visible entries, numbered from 1
pub fn render_view<C: Collation>(
    view: Projection<'_, C>,
    params: &FilterParams,
    total: usize,
) -> String {
    let mut out = String::new();
    for (i, entry) in view.iter().enumerate() {
        out.push_str(&format!("{:>4}. {}\n", i + 1, entry));
    }

    let by = if params.match_translation { "translation" } else { "word" };
    out.push_str(&format!(
        "-- {} of {} shown (type: {}, {}: '{}')",
        view.len(),
        total,
        params.word_type.as_str(),
        by,
        params.search_text
    ));
    out
}
