use std::path::{Path, PathBuf};

use wortschatz_core::dictionary::{
    DictionaryStore, DocumentExporter, StoreError, load_into, save_index,
};
use wortschatz_core::preprocess::{DefaultPreprocessor, Preprocessor};
use wortschatz_core::{
    Collation, Entry, FilterParams, FilterView, IndexError, Projection, SortedIndex, WordType,
};
use wortschatz_io::{ExportError, JsonStore, TextExporter};

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Enter a word first")]
    EmptyWord,

    #[error("Words cannot be added while searching translations")]
    InsertDisabled,

    #[error("\"{0}\" is already in the dictionary")]
    Duplicate(String),

    #[error("No save location yet, use: save <path>")]
    NoSaveLocation,

    #[error("Cannot use {path}: dictionary files end with .{expected}")]
    WrongExtension { path: String, expected: String },

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// The dictionary being edited: sorted entries, the filtered view over them
/// and where they are saved
pub struct Editor<C> {
    index: SortedIndex<C>,
    view: FilterView,
    store: JsonStore,
    exporter: TextExporter,
    preprocessor: DefaultPreprocessor,
    default_translation: String,
    save_location: Option<PathBuf>,
    save_required: bool,
}

impl<C: Collation + Clone> Editor<C> {
    pub fn new(collation: C, default_translation: impl Into<String>) -> Self {
        let mut index = SortedIndex::new(collation);
        let view = FilterView::new(&mut index, FilterParams::default());

        Self {
            index,
            view,
            store: JsonStore,
            exporter: TextExporter,
            preprocessor: DefaultPreprocessor,
            default_translation: default_translation.into(),
            save_location: None,
            save_required: false,
        }
    }

    pub fn index(&self) -> &SortedIndex<C> {
        &self.index
    }

    /// Entries passing the current filter, in sorted order
    pub fn visible(&mut self) -> Projection<'_, C> {
        self.view.sync(&self.index)
    }

    pub fn filter(&self) -> &FilterParams {
        self.view.params()
    }

    pub fn save_location(&self) -> Option<&Path> {
        self.save_location.as_deref()
    }

    pub fn save_required(&self) -> bool {
        self.save_required
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.view.set_search_text(self.preprocessor.normalize(text));
    }

    pub fn set_word_type(&mut self, word_type: WordType) {
        self.view.set_word_type(word_type);
    }

    pub fn set_match_translation(&mut self, match_translation: bool) {
        self.view.set_match_translation(match_translation);
    }

    /// Add a word with the placeholder translation
    pub fn insert(&mut self, word: &str) -> Result<(), EditorError> {
        let word = self.preprocessor.process(word);
        if word.is_empty() {
            return Err(EditorError::EmptyWord);
        }
        if self.view.params().match_translation {
            return Err(EditorError::InsertDisabled);
        }
        if self.index.contains(&word) {
            return Err(EditorError::Duplicate(word));
        }

        let entry = self.index.entry(word, self.default_translation.clone());
        self.index.insert(entry);
        self.save_required = true;
        Ok(())
    }

    pub fn remove(&mut self, word: &str) -> Result<Entry, EditorError> {
        let removed = self.index.remove_word(&self.preprocessor.process(word))?;
        self.save_required = true;
        Ok(removed)
    }

    pub fn translate(&mut self, word: &str, translation: &str) -> Result<(), EditorError> {
        let word = self.preprocessor.process(word);
        if self.index.set_translation(&word, self.preprocessor.process(translation))? {
            self.save_required = true;
        }
        Ok(())
    }

    pub fn new_dictionary(&mut self) {
        self.index.clear();
        self.save_location = None;
        self.save_required = false;
    }

    /// Replace the dictionary with the file at `path`
    ///
    /// The current dictionary is kept if the file cannot be read.
    pub fn open(&mut self, path: &Path) -> Result<usize, EditorError> {
        let mut index = SortedIndex::new(self.index.collation().clone());
        let count = load_into(&self.store, &mut index, path)?;

        let params = self.view.params().clone();
        self.index = index;
        self.view = FilterView::new(&mut self.index, params);
        self.save_location = Some(path.to_path_buf());
        self.save_required = false;
        Ok(count)
    }

    /// Save to the current location
    pub fn save(&mut self) -> Result<PathBuf, EditorError> {
        let path = self.save_location.clone().ok_or(EditorError::NoSaveLocation)?;
        self.write(path)
    }

    /// Save to `path`, which becomes the current location
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf, EditorError> {
        let path = self.with_store_extension(path)?;
        self.write(path)
    }

    /// Save if there is a location and something changed
    pub fn autosave(&mut self) -> Result<Option<PathBuf>, EditorError> {
        match &self.save_location {
            Some(path) if self.save_required => {
                let path = path.clone();
                self.write(path).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn export(&self, path: &Path) -> Result<(), EditorError> {
        self.exporter.export(&self.index, path)?;
        Ok(())
    }

    fn write(&mut self, path: PathBuf) -> Result<PathBuf, EditorError> {
        save_index(&self.store, &self.index, &path)?;
        self.save_location = Some(path.clone());
        self.save_required = false;
        Ok(path)
    }

    fn with_store_extension(&self, path: &Path) -> Result<PathBuf, EditorError> {
        let expected = self.store.extension();
        match path.extension().and_then(|e| e.to_str()) {
            None => Ok(path.with_extension(expected)),
            Some(ext) if ext.eq_ignore_ascii_case(expected) => Ok(path.to_path_buf()),
            Some(_) => Err(EditorError::WrongExtension {
                path: path.display().to_string(),
                expected: expected.to_string(),
            }),
        }
    }
}
