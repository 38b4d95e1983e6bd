//! Minimal article-aware collation for unit tests

use crate::collation::Collation;

pub struct TestCollation;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn first_word_ends_with_en(text: &str) -> bool {
    let word: String = text.chars().take_while(|c| is_word_char(*c)).collect();
    word.chars().count() > 2 && word.ends_with("en")
}

impl Collation for TestCollation {
    fn classify(&self, headword: &str) -> bool {
        let folded = headword.to_lowercase();
        ["der ", "die ", "das "].iter().any(|article| {
            folded
                .strip_prefix(article)
                .and_then(|rest| rest.chars().next())
                .is_some_and(is_word_char)
        })
    }

    fn article_strip_len(&self) -> usize {
        4
    }

    fn is_verb(&self, headword: &str) -> bool {
        let folded = headword.to_lowercase();
        let rest = folded.strip_prefix("sich ").unwrap_or(&folded);
        first_word_ends_with_en(rest)
    }

    fn is_uncategorized(&self, headword: &str) -> bool {
        let folded = headword.to_lowercase();
        let reflexive = folded
            .strip_prefix("sich ")
            .and_then(|rest| rest.chars().next())
            .is_some_and(is_word_char);
        !reflexive && !self.classify(headword) && !first_word_ends_with_en(&folded)
    }
}
