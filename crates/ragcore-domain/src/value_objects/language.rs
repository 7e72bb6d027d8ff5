use serde::{Deserialize, Serialize};

/// Languages supported by the tokenized-text (`fts_tokens`) derivation and
/// by the template catalog (§3, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    English,
    /// Arabic.
    Arabic,
    /// German.
    German,
    /// French.
    French,
}

impl Language {
    /// The Postgres `regconfig` name used to tokenize text in this language.
    #[must_use]
    pub fn pg_regconfig(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Arabic => "arabic",
            Self::German => "german",
            Self::French => "french",
        }
    }

    /// Parse a language tag, defaulting to [`Language::English`] on unknown input.
    #[must_use]
    pub fn parse_or_default(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "arabic" => Self::Arabic,
            "german" => Self::German,
            "french" => Self::French,
            _ => Self::English,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.pg_regconfig())
    }
}
