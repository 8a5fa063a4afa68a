//! Report labels in English and French

mod en;
mod fr;

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Fr,
}

impl Language {
    /// Resolve a `general.language` setting; "auto" reads the locale
    /// environment, anything unsupported is English
    pub fn from_setting(setting: &str) -> Self {
        match setting {
            "auto" => {
                let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
                    .iter()
                    .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
                    .unwrap_or_default();
                Self::from_locale(&locale)
            }
            code => Self::from_locale(code),
        }
    }

    /// "fr", "fr_FR.UTF-8" and "fr-CA" are all French
    fn from_locale(locale: &str) -> Self {
        let code = locale.split(['_', '-', '.']).next().unwrap_or_default();
        if code.eq_ignore_ascii_case("fr") {
            Language::Fr
        } else {
            Language::En
        }
    }

    fn labels(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => en::LABELS,
            Language::Fr => fr::LABELS,
        }
    }
}

/// Label lookup for one language
pub struct I18n {
    language: Language,
    labels: HashMap<&'static str, &'static str>,
}

impl I18n {
    pub fn new(setting: &str) -> Self {
        let language = Language::from_setting(setting);
        log::debug!("Report language: {:?}", language);
        Self {
            language,
            labels: language.labels().iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Label for `key`, or the key itself when there is none
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels.get(key).copied().unwrap_or(key)
    }
}
