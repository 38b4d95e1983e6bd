use serde::{Deserialize, Serialize};

/// Language of the surrounding application's messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiLanguage {
    #[default]
    English,
    Serbian,
}

impl UiLanguage {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Some(UiLanguage::English),
            "serbian" | "sr" => Some(UiLanguage::Serbian),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UiLanguage::English => "English",
            UiLanguage::Serbian => "Serbian",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub language: UiLanguage,
}
