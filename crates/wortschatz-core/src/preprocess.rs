use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// NFC only, whitespace kept (search text)
    fn normalize(&self, text: &str) -> String {
        text.nfc().collect()
    }

    // Default headword/translation cleanup
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFC keeps umlauts composed)
        let text = self.normalize(text);

        // Entries are single-line
        text.replace(['\n', '\r'], " ").trim().to_string()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
