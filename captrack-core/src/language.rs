//! Ordered caption language configuration.
//!
//! The first language is the one spoken in the source clips; the rest are
//! translation targets. The same list drives the pipeline's output
//! directories and the runtime language dropdown, so both always agree.

use crate::error::LanguageError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Languages used when none are configured.
pub const DEFAULT_LANGUAGES: &[&str] = &["English", "Spanish", "French", "German", "Japanese"];

/// Non-empty, duplicate-free, ordered list of language names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageSet(Vec<String>);

impl LanguageSet {
    /// Validate and build a language set.
    ///
    /// Names are trimmed; comparison for duplicates ignores ASCII case.
    pub fn new<I, S>(names: I) -> Result<Self, LanguageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut languages: Vec<String> = Vec::new();

        for (i, name) in names.into_iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(LanguageError::Blank(i));
            }
            if name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(LanguageError::PathSeparator(name.to_string()));
            }
            if languages.iter().any(|l| l.eq_ignore_ascii_case(name)) {
                return Err(LanguageError::Duplicate(name.to_string()));
            }
            languages.push(name.to_string());
        }

        if languages.is_empty() {
            return Err(LanguageError::Empty);
        }

        Ok(Self(languages))
    }

    /// Language of the source audio.
    pub fn original(&self) -> &str {
        &self.0[0]
    }

    /// Translation targets, in configured order.
    pub fn translations(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Position of a language, ignoring ASCII case.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|l| l.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for LanguageSet {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect())
    }
}

impl FromStr for LanguageSet {
    type Err = LanguageError;

    /// Parse a comma-separated list such as `English,Spanish`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(','))
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_language_is_original() {
        let set: LanguageSet = "English, Spanish,French".parse().unwrap();

        assert_eq!(set.original(), "English");
        assert_eq!(set.translations(), ["Spanish", "French"]);
        assert_eq!(set.to_string(), "English,Spanish,French");
    }

    #[test]
    fn rejects_invalid_lists() {
        assert_eq!(LanguageSet::new(Vec::<&str>::new()), Err(LanguageError::Empty));
        assert_eq!(
            "English,,French".parse::<LanguageSet>(),
            Err(LanguageError::Blank(1))
        );
        assert_eq!(
            "English,english".parse::<LanguageSet>(),
            Err(LanguageError::Duplicate("english".to_string()))
        );
        assert!(matches!(
            "English,../etc".parse::<LanguageSet>(),
            Err(LanguageError::PathSeparator(_))
        ));
    }

    #[test]
    fn default_list_is_valid() {
        let set = LanguageSet::default();

        assert!(LanguageSet::new(set.iter()).is_ok());
        assert_eq!(set.position("spanish"), Some(1));
    }
}
