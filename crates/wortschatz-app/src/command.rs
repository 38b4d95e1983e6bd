use std::path::PathBuf;
use std::str::FromStr;

use wortschatz_config::ui::UiLanguage;
use wortschatz_core::WordType;

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(String),
    Remove(String),
    Translate { word: String, translation: String },
    Find(String),
    Type(WordType),
    /// Match the search text against translations instead of words
    By { translation: bool },
    List,
    New,
    Open(PathBuf),
    Save(Option<PathBuf>),
    Export(PathBuf),
    Lang(UiLanguage),
    Autosave(u64),
    AutoOpen(bool),
    Help,
    Quit { force: bool },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("Unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

fn bad(command: &'static str, expected: &'static str) -> ParseCommandError {
    ParseCommandError::BadArgument { command, expected }
}

fn required(command: &'static str, rest: &str) -> Result<String, ParseCommandError> {
    if rest.is_empty() {
        Err(bad(command, "a word"))
    } else {
        Ok(rest.to_string())
    }
}

fn path(command: &'static str, rest: &str) -> Result<PathBuf, ParseCommandError> {
    if rest.is_empty() {
        Err(bad(command, "a file path"))
    } else {
        Ok(PathBuf::from(rest))
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (name, raw) = match line.split_once(char::is_whitespace) {
            Some((name, raw)) => (name, raw),
            None => (line.trim_end(), ""),
        };
        let rest = raw.trim();

        match name.to_lowercase().as_str() {
            "add" => required("add", rest).map(Command::Add),
            "rm" | "remove" => required("rm", rest).map(Command::Remove),
            "tr" | "translate" => {
                let (word, translation) = rest
                    .split_once('=')
                    .ok_or_else(|| bad("tr", "<word> = <translation>"))?;
                let word = word.trim();
                if word.is_empty() {
                    return Err(bad("tr", "<word> = <translation>"));
                }
                Ok(Command::Translate {
                    word: word.to_string(),
                    translation: translation.trim().to_string(),
                })
            }
            // Search text is matched as typed, spaces included
            "find" => Ok(Command::Find(raw.trim_end_matches('\r').to_string())),
            "type" => WordType::from_str(rest)
                .map(Command::Type)
                .ok_or_else(|| bad("type", "all, nouns, verbs or other")),
            "by" => match rest.to_lowercase().as_str() {
                "word" => Ok(Command::By { translation: false }),
                "translation" => Ok(Command::By { translation: true }),
                _ => Err(bad("by", "word or translation")),
            },
            "ls" | "list" => Ok(Command::List),
            "new" => Ok(Command::New),
            "open" => path("open", rest).map(Command::Open),
            "save" => Ok(Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            "export" => path("export", rest).map(Command::Export),
            "lang" => UiLanguage::from_str(rest)
                .map(Command::Lang)
                .ok_or_else(|| bad("lang", "english or serbian")),
            "autosave" => rest
                .parse()
                .map(Command::Autosave)
                .map_err(|_| bad("autosave", "seconds (0 turns it off)")),
            "auto-open" => match rest.to_lowercase().as_str() {
                "on" => Ok(Command::AutoOpen(true)),
                "off" => Ok(Command::AutoOpen(false)),
                _ => Err(bad("auto-open", "on or off")),
            },
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit { force: false }),
            "quit!" | "exit!" => Ok(Command::Quit { force: true }),
            _ => Err(ParseCommandError::Unknown(name.to_string())),
        }
    }
}
