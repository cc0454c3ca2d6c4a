use std::path::PathBuf;

use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

use crate::analysis::classify::DEFAULT_AT_RISK_DAYS;
use crate::error::{Error, Result};
use crate::io::lenient::parse_date;
use crate::model::{CategoryRule, CategoryStyle, CategoryVocabulary, InputFormat};

/// Finish date assumed when the schedule has no usable project root.
pub const DEFAULT_FALLBACK_FINISH: &str = "2025-09-18";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSetting {
    #[default]
    Auto,
    Named,
    Fixed,
}

impl FormatSetting {
    pub fn forced(self) -> Option<InputFormat> {
        match self {
            FormatSetting::Auto => None,
            FormatSetting::Named => Some(InputFormat::Named),
            FormatSetting::Fixed => Some(InputFormat::Fixed),
        }
    }
}

/// One vocabulary entry as written in `Cronograma.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryEntry {
    pub label: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether the category belongs to the fixed principal order.
    #[serde(default)]
    pub principal: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub format: FormatSetting,
    pub fallback_finish_date: String,
    pub at_risk_days: i64,
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    #[serde(default)]
    pub categories: Option<Vec<CategoryEntry>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            format: FormatSetting::Auto,
            fallback_finish_date: DEFAULT_FALLBACK_FINISH.to_string(),
            at_risk_days: DEFAULT_AT_RISK_DAYS,
            snapshot_path: None,
            categories: None,
        }
    }
}

/// Load defaults, then `Cronograma.toml` if present, then `CRONOGRAMA_*` variables.
pub fn load_configuration() -> std::result::Result<AppConfig, ConfigError> {
    Config::builder()
        .set_default("fallback_finish_date", DEFAULT_FALLBACK_FINISH)?
        .set_default("at_risk_days", DEFAULT_AT_RISK_DAYS)?
        .add_source(ConfigFile::with_name("Cronograma").required(false))
        .add_source(Environment::with_prefix("CRONOGRAMA"))
        .build()?
        .try_deserialize::<AppConfig>()
}

impl AppConfig {
    pub fn delimiter(&self) -> Result<Option<char>> {
        let Some(raw) = self.delimiter.as_deref() else {
            return Ok(None);
        };
        let raw = if raw == "\\t" || raw.eq_ignore_ascii_case("tab") { "\t" } else { raw };
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => Ok(Some(c)),
            _ => Err(Error::Config(ConfigError::Message(format!(
                "delimiter must be a single ASCII character, got {raw:?}"
            )))),
        }
    }

    pub fn fallback_finish(&self) -> Result<NaiveDate> {
        parse_date(&self.fallback_finish_date)
            .ok_or_else(|| Error::InvalidDate(self.fallback_finish_date.clone()))
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(crate::io::default_snapshot_path)
    }

    /// Configured vocabulary, or the built-in one when none is configured.
    pub fn vocabulary(&self) -> CategoryVocabulary {
        let Some(entries) = &self.categories else {
            return CategoryVocabulary::default();
        };
        let defaults = CategoryVocabulary::default();

        let rules = entries
            .iter()
            .map(|e| CategoryRule {
                label: e.label.clone(),
                keywords: e.keywords.clone(),
            })
            .collect();
        let styles = entries
            .iter()
            .map(|e| {
                let (color, icon) = defaults.style_of(&e.label);
                CategoryStyle {
                    label: e.label.clone(),
                    color: e.color.clone().unwrap_or_else(|| color.to_string()),
                    icon: e.icon.clone().unwrap_or_else(|| icon.to_string()),
                }
            })
            .collect();
        let principal = entries
            .iter()
            .filter(|e| e.principal)
            .map(|e| e.label.clone())
            .collect();

        CategoryVocabulary {
            rules,
            styles,
            principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.delimiter().unwrap(), None);
        assert_eq!(
            cfg.fallback_finish().unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 18).unwrap()
        );
        assert_eq!(cfg.vocabulary(), CategoryVocabulary::default());
    }

    #[test]
    fn delimiter_must_be_one_ascii_char() {
        let mut cfg = AppConfig::default();
        cfg.delimiter = Some(";".into());
        assert_eq!(cfg.delimiter().unwrap(), Some(';'));
        cfg.delimiter = Some("tab".into());
        assert_eq!(cfg.delimiter().unwrap(), Some('\t'));
        cfg.delimiter = Some(";;".into());
        assert!(cfg.delimiter().is_err());
    }

    #[test]
    fn configured_vocabulary_replaces_builtin() {
        let cfg = AppConfig {
            categories: Some(vec![CategoryEntry {
                label: "Elétrica".into(),
                keywords: vec!["Cabo".into()],
                color: None,
                icon: Some("bolt".into()),
                principal: true,
            }]),
            ..AppConfig::default()
        };
        let vocab = cfg.vocabulary();
        assert_eq!(vocab.match_name("Cabo de força"), Some("Elétrica"));
        assert_eq!(vocab.style_of("Elétrica"), ("#F59E0B", "bolt"));
        assert_eq!(vocab.principal, vec!["Elétrica".to_string()]);
    }

    #[test]
    fn bad_fallback_date_is_reported() {
        let cfg = AppConfig {
            fallback_finish_date: "someday".into(),
            ..AppConfig::default()
        };
        assert!(matches!(cfg.fallback_finish(), Err(Error::InvalidDate(_))));
    }
}
