use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use wortschatz_core::dictionary::DocumentExporter;
use wortschatz_core::{Collation, Entry, SortedIndex};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Nothing to export: the dictionary is empty")]
    Empty,

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Plain-text word list grouped under letter headings
///
/// ```text
/// A
/// Apfel  =  apple
///
/// H
/// der Hund  =  dog
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl TextExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn render<C: Collation, W: Write>(
        &self,
        index: &SortedIndex<C>,
        out: &mut W,
    ) -> Result<(), ExportError> {
        if index.is_empty() {
            return Err(ExportError::Empty);
        }

        let collation = index.collation();
        let mut current_letter: Option<String> = None;

        for entry in index {
            let letter = first_letter(collation, entry);
            if current_letter.as_deref() != Some(letter.as_str()) {
                if current_letter.is_some() {
                    writeln!(out)?;
                }
                writeln!(out, "{}", letter)?;
                current_letter = Some(letter);
            }

            writeln!(
                out,
                "{}  =  {}",
                clean_word(entry.headword()),
                clean_translation(entry.translation())
            )?;
        }

        Ok(())
    }
}

impl DocumentExporter for TextExporter {
    type Error = ExportError;

    fn export<C: Collation>(&self, index: &SortedIndex<C>, path: &Path) -> Result<(), ExportError> {
        if index.is_empty() {
            return Err(ExportError::Empty);
        }

        let mut out = BufWriter::new(File::create(path)?);
        self.render(index, &mut out)?;
        out.flush()?;

        tracing::info!("Exported {} entries to {}", index.len(), path.display());
        Ok(())
    }
}

/// Uppercased first letter of the sort key (articles skipped)
fn first_letter<C: Collation>(collation: &C, entry: &Entry) -> String {
    collation
        .sort_key(entry)
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

fn clean_word(word: &str) -> &str {
    word.trim_end_matches([' ', '/', '('])
}

fn clean_translation(translation: &str) -> String {
    translation.trim_end().replace(['\t', '\r', '\n'], " ")
}
