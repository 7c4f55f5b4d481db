use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg;
use tracing::debug;

use crate::dimensions::{
    MAX_RENDER_DIMENSION, RENDER_OVERSAMPLING, SizeHint, density_conversion_factor,
    parse_size_hint, target_pixel_size,
};
use crate::error::{ImageRepairError, ImageRepairResult};

/// Marker of an SVG that wraps a raster payload instead of vector content.
const EMBEDDED_PNG_MARKER: &[u8] = b"data:image/png;base64";

/// Result of [`ImageRepairer::convert_to_png`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairedImage {
    /// The image can be stored as downloaded.
    NoRepairNeeded,
    /// A malformed SVG re-rendered to PNG.
    RenderedSvg {
        png_contents: Vec<u8>,
        width: u32,
        height: u32,
    },
    /// First frame of a GIF re-encoded as PNG.
    ConvertedFromGif { png_contents: Vec<u8> },
}

/// Detects images that cannot be displayed as downloaded and converts them to PNG.
#[derive(Debug, Clone)]
pub struct ImageRepairer {
    density_factor: f64,
}

impl Default for ImageRepairer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageRepairer {
    pub fn new() -> Self {
        Self {
            density_factor: density_conversion_factor(),
        }
    }

    /// Uses a custom authoring-to-device density factor.
    #[must_use]
    pub const fn with_density_factor(mut self, density_factor: f64) -> Self {
        self.density_factor = density_factor;
        self
    }

    /// Converts `contents` (named `filename`) to PNG when it needs repair.
    ///
    /// SVGs are re-rendered only when they embed a base64 PNG payload. GIFs are
    /// always flattened to their first frame.
    pub fn convert_to_png(&self, filename: &str, contents: &[u8]) -> ImageRepairResult<RepairedImage> {
        match extension_of(filename).as_deref() {
            Some("svg") if contains_embedded_png(contents) => self.render_svg(filename, contents),
            Some("gif") => {
                let frame = image::load_from_memory_with_format(contents, ImageFormat::Gif)
                    .map_err(|source| ImageRepairError::Codec {
                        filename: filename.to_string(),
                        source,
                    })?;
                let png_contents = encode_png(filename, frame)?;
                debug!(filename, "Converted GIF to PNG");
                Ok(RepairedImage::ConvertedFromGif { png_contents })
            }
            _ => Ok(RepairedImage::NoRepairNeeded),
        }
    }

    /// Whether two images with the given extension are identical.
    ///
    /// SVGs are compared byte for byte; raster images pixel for pixel. Raster
    /// data that fails to decode is only equal when byte-identical.
    #[allow(clippy::unused_self)]
    pub fn are_equal_images(&self, extension: &str, first: &[u8], second: &[u8]) -> bool {
        if first == second {
            return true;
        }
        if extension.eq_ignore_ascii_case("svg") {
            return false;
        }
        match (image::load_from_memory(first), image::load_from_memory(second)) {
            (Ok(first), Ok(second)) => {
                first.width() == second.width()
                    && first.height() == second.height()
                    && first.to_rgba8().as_raw() == second.to_rgba8().as_raw()
            }
            _ => false,
        }
    }

    fn render_svg(&self, filename: &str, contents: &[u8]) -> ImageRepairResult<RepairedImage> {
        let tree = usvg::Tree::from_data(contents, &usvg::Options::default()).map_err(|e| {
            ImageRepairError::InvalidSvg {
                filename: filename.to_string(),
                message: e.to_string(),
            }
        })?;
        let intrinsic = tree.size();
        let hint = parse_size_hint(filename).unwrap_or(SizeHint {
            width: f64::from(intrinsic.width()),
            height: f64::from(intrinsic.height()),
        });
        let (width, height) = target_pixel_size(hint, self.density_factor);

        let render_width = width.saturating_mul(RENDER_OVERSAMPLING);
        let render_height = height.saturating_mul(RENDER_OVERSAMPLING);
        if render_width > MAX_RENDER_DIMENSION || render_height > MAX_RENDER_DIMENSION {
            return Err(ImageRepairError::InvalidRenderSize {
                filename: filename.to_string(),
                width: render_width,
                height: render_height,
            });
        }
        let mut pixmap =
            Pixmap::new(render_width, render_height).ok_or_else(|| ImageRepairError::InvalidRenderSize {
                filename: filename.to_string(),
                width: render_width,
                height: render_height,
            })?;
        #[allow(clippy::cast_precision_loss)]
        let transform = Transform::from_scale(
            render_width as f32 / intrinsic.width(),
            render_height as f32 / intrinsic.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let oversampled = demultiplied(&pixmap, filename)?;
        let resized = image::imageops::resize(&oversampled, width, height, FilterType::Lanczos3);
        let png_contents = encode_png(filename, DynamicImage::ImageRgba8(resized))?;
        debug!(filename, width, height, "Re-rendered SVG to PNG");
        Ok(RepairedImage::RenderedSvg {
            png_contents,
            width,
            height,
        })
    }
}

fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

fn contains_embedded_png(contents: &[u8]) -> bool {
    contents
        .windows(EMBEDDED_PNG_MARKER.len())
        .any(|window| window == EMBEDDED_PNG_MARKER)
}

fn demultiplied(pixmap: &Pixmap, filename: &str) -> ImageRepairResult<RgbaImage> {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or_else(|| {
        ImageRepairError::InvalidRenderSize {
            filename: filename.to_string(),
            width: pixmap.width(),
            height: pixmap.height(),
        }
    })
}

fn encode_png(filename: &str, image: DynamicImage) -> ImageRepairResult<Vec<u8>> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|source| ImageRepairError::Codec {
            filename: filename.to_string(),
            source,
        })?;
    Ok(png)
}
