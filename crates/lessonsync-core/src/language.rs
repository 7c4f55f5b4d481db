//! Content languages and their code mappings.
//!
//! Two code families exist: the *collapse* codes used when naming files and
//! identifiers, and the *legacy* codes used as keys in the converted
//! translation and voiceover maps stored on device.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A language that lesson content can be localized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageType {
    /// Sentinel for a missing language on the wire.
    #[serde(rename = "LANGUAGE_CODE_UNSPECIFIED")]
    Unspecified,
    English,
    Arabic,
    Hindi,
    HinglishHindiEnglish,
    BrazilianPortuguese,
    Swahili,
    NigerianPidgin,
}

/// Error returned when a language has no code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("language is unspecified and has no code mapping")]
pub struct UnspecifiedLanguageError;

impl LanguageType {
    /// Language every structure's default localization is expected to use.
    pub const DEFAULT: Self = Self::English;

    /// Additional languages requested for every download.
    pub const REQUESTED_ADDITIONAL: [Self; 3] = [
        Self::Arabic,
        Self::BrazilianPortuguese,
        Self::NigerianPidgin,
    ];

    /// Short code used when building file names and localized identifiers.
    pub const fn collapse_code(self) -> Result<&'static str, UnspecifiedLanguageError> {
        match self {
            Self::Unspecified => Err(UnspecifiedLanguageError),
            Self::English => Ok("en"),
            Self::Arabic => Ok("ar"),
            Self::Hindi => Ok("hi"),
            Self::HinglishHindiEnglish => Ok("hi-en"),
            Self::BrazilianPortuguese => Ok("pt-br"),
            Self::Swahili => Ok("sw"),
            Self::NigerianPidgin => Ok("pcm"),
        }
    }

    /// Code used as the language key in converted translation maps.
    pub const fn legacy_code(self) -> Result<&'static str, UnspecifiedLanguageError> {
        match self {
            Self::BrazilianPortuguese => Ok("pt-BR"),
            other => other.collapse_code(),
        }
    }

    /// Code used as the language key in converted voiceover maps.
    ///
    /// Voiceovers were historically keyed by `pt` rather than `pt-BR`.
    pub const fn voiceover_code(self) -> Result<&'static str, UnspecifiedLanguageError> {
        match self {
            Self::BrazilianPortuguese => Ok("pt"),
            other => other.legacy_code(),
        }
    }
}

impl fmt::Display for LanguageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "LANGUAGE_CODE_UNSPECIFIED",
            Self::English => "ENGLISH",
            Self::Arabic => "ARABIC",
            Self::Hindi => "HINDI",
            Self::HinglishHindiEnglish => "HINGLISH_HINDI_ENGLISH",
            Self::BrazilianPortuguese => "BRAZILIAN_PORTUGUESE",
            Self::Swahili => "SWAHILI",
            Self::NigerianPidgin => "NIGERIAN_PIDGIN",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_codes_differ_per_family() {
        let lang = LanguageType::BrazilianPortuguese;
        assert_eq!(lang.collapse_code(), Ok("pt-br"));
        assert_eq!(lang.legacy_code(), Ok("pt-BR"));
        assert_eq!(lang.voiceover_code(), Ok("pt"));
    }

    #[test]
    fn test_unspecified_has_no_code() {
        assert!(LanguageType::Unspecified.collapse_code().is_err());
        assert!(LanguageType::Unspecified.legacy_code().is_err());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_string(&LanguageType::NigerianPidgin).unwrap();
        assert_eq!(json, "\"NIGERIAN_PIDGIN\"");
        let parsed: LanguageType = serde_json::from_str("\"LANGUAGE_CODE_UNSPECIFIED\"").unwrap();
        assert_eq!(parsed, LanguageType::Unspecified);
    }
}
