//! Export of a sync's content: converted records plus the raw wire structures.

mod convert;
mod writer;

pub use convert::{ConvertedContent, convert_content};
pub use writer::{CONTENT_DIR, ContentExporter, IMAGES_DIR, WIRE_DIR};
