//! Conversion of wire structures into the normalized content model.
//!
//! All functions here are pure: they read a wire structure plus the image
//! filename replacements computed for its container and produce a content
//! record. Malformed structures fail with [`ConvertError`].
//!
//! Text for per-structure fields is read through a [`ContentIdTracker`] so
//! that only translations and voiceovers for referenced content ids survive
//! conversion.
#![deny(unused_crate_dependencies)]

mod error;
mod exploration;
mod html;
pub mod interaction;
mod localization;
mod records;
mod tracker;

pub use error::{ConvertError, ConvertResult};
pub use exploration::{convert_exploration, convert_state};
pub use html::{fix_image_references, fix_image_references_in_list};
pub use localization::ImageReplacements;
pub use records::{
    convert_concept_card, convert_concept_card_list, convert_downloadable_topic,
    convert_revision_card, convert_story, convert_topic_id_list, convert_upcoming_topic,
};
pub use tracker::ContentIdTracker;

// Silence unused dev-dependency warnings
#[cfg(test)]
use serde_json as _;
