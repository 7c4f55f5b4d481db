//! Image repair for downloaded lesson assets.
//!
//! Some lesson SVGs wrap an oversized base64 PNG rather than vector content
//! and some images are animated GIFs; both are converted to PNG so every
//! stored asset renders consistently.
#![deny(unused_crate_dependencies)]

pub mod dimensions;
mod error;
mod repairer;

pub use error::{ImageRepairError, ImageRepairResult};
pub use repairer::{ImageRepairer, RepairedImage};
