//! Conversion errors.
//!
//! Every variant is a backend contract violation: the converter never guesses
//! around malformed structures.

use lessonsync_core::UnspecifiedLanguageError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A referenced content id has no entry in the default localization.
    #[error("Content id '{content_id}' is missing from the default localization")]
    MissingContent { content_id: String },

    /// A single text was required but the localization holds a set.
    #[error("Content id '{content_id}' is not a single localizable text")]
    NotSingleText { content_id: String },

    /// A set of texts was required but the localization holds a single text.
    #[error("Content id '{content_id}' is not a set of localizable texts")]
    NotTextSet { content_id: String },

    /// A state's interaction has no interaction type.
    #[error("Interaction in state '{state_name}' has no interaction type")]
    UnsetInteraction { state_name: String },

    /// A rule spec has no rule type.
    #[error("{interaction_id} rule spec has no rule type")]
    UnsetRule { interaction_id: &'static str },

    /// An image region is not a normalized rectangle.
    #[error("Image region '{label}' is not a normalized rectangle")]
    UnsupportedRegion { label: String },

    /// Two localizations map to the same language key.
    #[error("{key} was present more than once in collection")]
    DuplicateKey { key: String },

    /// A localization declares no language.
    #[error(transparent)]
    UnspecifiedLanguage(#[from] UnspecifiedLanguageError),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
