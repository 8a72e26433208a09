use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ReportError, Result};

const EN: &str = include_str!("../locales/en.json");
const FR: &str = include_str!("../locales/fr.json");

/// Localized labels for best-practice rule identifiers.
pub trait Translate {
    fn translate_rule(&self, rule_id: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct LocaleFile {
    #[serde(default)]
    rules: HashMap<String, String>,
}

/// Rule catalog for one language.
#[derive(Debug, Clone)]
pub struct Catalog {
    language: String,
    rules: HashMap<String, String>,
}

impl Catalog {
    /// A custom locale file when given, the embedded `language` otherwise.
    pub fn load(language: &str, locale_file: Option<&Path>) -> Result<Self> {
        match locale_file {
            Some(path) => Catalog::from_file(path),
            None => Catalog::for_language(language),
        }
    }

    /// Load one of the embedded locales (`en`, `fr`).
    pub fn for_language(language: &str) -> Result<Self> {
        let raw = match language {
            "en" => EN,
            "fr" => FR,
            other => return Err(ReportError::UnknownLanguage(other.to_string())),
        };
        let locale: LocaleFile = serde_json::from_str(raw).map_err(|source| ReportError::Parse {
            path: format!("locales/{}.json", language).into(),
            source,
        })?;
        Ok(Catalog {
            language: language.to_string(),
            rules: locale.rules,
        })
    }

    /// Load a custom locale file with the same `{"rules": {..}}` shape.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let locale: LocaleFile = serde_json::from_str(&raw).map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let language = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Loaded {} rule labels from {}", locale.rules.len(), path.display());
        Ok(Catalog {
            language,
            rules: locale.rules,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Translate for Catalog {
    fn translate_rule(&self, rule_id: &str) -> String {
        match self.rules.get(rule_id) {
            Some(label) => label.clone(),
            None => {
                debug!("No '{}' label for rule {}", self.language, rule_id);
                rule_id.to_string()
            }
        }
    }
}

/// Deterministic translator for tests: `CompressHttp` → `tr(CompressHttp)`.
#[cfg(test)]
pub struct StubTranslator;

#[cfg(test)]
impl Translate for StubTranslator {
    fn translate_rule(&self, rule_id: &str) -> String {
        format!("tr({})", rule_id)
    }
}

// ── Tests ──
