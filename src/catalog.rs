use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::CatalogError;

static TEXTS_DIR: Dir = include_dir!("src/texts");

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
pub enum Language {
    #[serde(rename = "pt-BR")]
    #[value(name = "pt-BR")]
    #[strum(serialize = "pt-BR")]
    PtBr,
    #[default]
    #[serde(rename = "en-US")]
    #[value(name = "en-US")]
    #[strum(serialize = "en-US")]
    EnUs,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::PtBr, Language::EnUs];

    pub fn next(self) -> Self {
        match self {
            Language::PtBr => Language::EnUs,
            Language::EnUs => Language::PtBr,
        }
    }

    fn file_name(self) -> String {
        format!("{self}.json")
    }
}

/// A sample text, typed one line at a time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub name: String,
    pub lines: Vec<String>,
    pub default_duration_secs: u32,
}

impl Text {
    /// Build a single-line text, e.g. from a custom prompt
    pub fn single_line(name: impl Into<String>, line: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            name: name.into(),
            lines: vec![line.into()],
            default_duration_secs: duration_secs,
        }
    }

    /// Total characters across all lines
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(|l| l.chars().count()).sum()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Refuse texts that could never be completed
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.lines.is_empty() {
            return Err(CatalogError::EmptyText(self.name.clone()));
        }
        if let Some(index) = self.lines.iter().position(|l| l.is_empty()) {
            return Err(CatalogError::EmptyLine {
                name: self.name.clone(),
                index,
            });
        }
        if self.default_duration_secs == 0 {
            return Err(CatalogError::ZeroDuration(self.name.clone()));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct TextFile {
    language: Language,
    texts: Vec<Text>,
}

/// Texts grouped by language
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    texts: HashMap<Language, Vec<Text>>,
}

impl Catalog {
    /// Load the texts bundled with the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut catalog = Catalog::default();
        for language in Language::ALL {
            let file_name = language.file_name();
            let Some(file) = TEXTS_DIR.get_file(&file_name) else {
                continue;
            };
            let contents = file
                .contents_utf8()
                .ok_or_else(|| CatalogError::Encoding(file_name.clone()))?;
            catalog.load_json(&file_name, contents)?;
        }
        Ok(catalog)
    }

    /// Merge the texts of one JSON catalog file
    pub fn load_json(&mut self, file: &str, json: &str) -> Result<(), CatalogError> {
        let parsed: TextFile =
            serde_json::from_str(json).map_err(|source| CatalogError::Malformed {
                file: file.to_string(),
                source,
            })?;
        self.texts
            .entry(parsed.language)
            .or_default()
            .extend(parsed.texts);
        Ok(())
    }

    /// Catalog holding exactly one text for one language
    pub fn single(language: Language, text: Text) -> Self {
        let mut texts = HashMap::new();
        texts.insert(language, vec![text]);
        Self { texts }
    }

    pub fn texts(&self, language: Language) -> &[Text] {
        self.texts.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get_text(&self, language: Language) -> Result<Text, CatalogError> {
        self.get_text_with(language, &mut rand::thread_rng())
    }

    pub fn get_text_with<R: Rng + ?Sized>(
        &self,
        language: Language,
        rng: &mut R,
    ) -> Result<Text, CatalogError> {
        self.texts(language)
            .choose(rng)
            .cloned()
            .ok_or(CatalogError::NoTexts(language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn embedded_catalog_has_both_languages() {
        let catalog = Catalog::embedded().unwrap();
        for language in Language::ALL {
            let texts = catalog.texts(language);
            assert_eq!(texts.len(), 2, "{language}");
            for text in texts {
                assert!(text.validate().is_ok(), "{}", text.name);
            }
        }
    }

    #[test]
    fn embedded_defaults_match_text_lengths() {
        let catalog = Catalog::embedded().unwrap();
        let short = catalog
            .texts(Language::EnUs)
            .iter()
            .find(|t| t.name == "Short")
            .unwrap();
        assert_eq!(short.default_duration_secs, 15);

        let medio = catalog
            .texts(Language::PtBr)
            .iter()
            .find(|t| t.name == "Médio")
            .unwrap();
        assert_eq!(medio.default_duration_secs, 30);
    }

    #[test]
    fn seeded_selection_is_stable() {
        let catalog = Catalog::embedded().unwrap();
        let a = catalog
            .get_text_with(Language::EnUs, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = catalog
            .get_text_with(Language::EnUs, &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_language_is_an_error() {
        let catalog = Catalog::single(Language::PtBr, Text::single_line("x", "abc", 5));
        assert_matches!(
            catalog.get_text(Language::EnUs),
            Err(CatalogError::NoTexts(Language::EnUs))
        );
    }

    #[test]
    fn malformed_json_is_reported() {
        let mut catalog = Catalog::default();
        let err = catalog.load_json("broken.json", "{ not json").unwrap_err();
        assert_matches!(err, CatalogError::Malformed { ref file, .. } if file == "broken.json");
    }

    #[test]
    fn char_count_spans_lines() {
        let text = Text {
            name: "t".into(),
            lines: vec!["abc".into(), "rã".into()],
            default_duration_secs: 10,
        };
        assert_eq!(text.char_count(), 5);
        assert_eq!(text.line(1), Some("rã"));
        assert_eq!(text.line(2), None);
    }

    #[test]
    fn validate_rejects_unusable_texts() {
        let empty = Text {
            name: "empty".into(),
            lines: vec![],
            default_duration_secs: 10,
        };
        assert_matches!(empty.validate(), Err(CatalogError::EmptyText(_)));

        let blank = Text {
            name: "blank".into(),
            lines: vec!["ok".into(), String::new()],
            default_duration_secs: 10,
        };
        assert_matches!(blank.validate(), Err(CatalogError::EmptyLine { index: 1, .. }));

        let zero = Text::single_line("zero", "abc", 0);
        assert_matches!(zero.validate(), Err(CatalogError::ZeroDuration(_)));
    }

    #[test]
    fn language_cycles_and_displays() {
        assert_eq!(Language::EnUs.next(), Language::PtBr);
        assert_eq!(Language::PtBr.next(), Language::EnUs);
        assert_eq!(Language::PtBr.to_string(), "pt-BR");
    }
}
