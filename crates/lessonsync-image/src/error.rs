use thiserror::Error;

/// Errors raised while repairing an image.
#[derive(Debug, Error)]
pub enum ImageRepairError {
    /// The SVG document could not be parsed.
    #[error("Failed to parse SVG '{filename}': {message}")]
    InvalidSvg {
        /// Name of the image being repaired.
        filename: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The requested raster size was zero or too large to allocate.
    #[error("Cannot render '{filename}' at {width}x{height}")]
    InvalidRenderSize {
        filename: String,
        width: u32,
        height: u32,
    },

    /// A raster image could not be decoded or encoded.
    #[error("Image codec failure for '{filename}': {source}")]
    Codec {
        filename: String,
        #[source]
        source: image::ImageError,
    },
}

pub type ImageRepairResult<T> = Result<T, ImageRepairError>;
