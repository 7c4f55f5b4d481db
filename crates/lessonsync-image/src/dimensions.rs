//! Target raster sizes for re-rendered vector images.
//!
//! Lesson images were authored against a reference monitor. Their sizes are
//! converted to device-independent pixels of a common phone screen so the
//! rendered asset has roughly the physical size the author intended.

use std::sync::LazyLock;

use regex::Regex;

/// Pixels per inch of the monitor lesson images were calibrated on.
pub const REFERENCE_MONITOR_PPI: f64 = 81.589;

/// Phones are smaller than the calibration display; images are scaled down by this factor.
pub const RELATIVE_SIZE_ADJUSTMENT_FACTOR: f64 = 0.15;

/// Diagonal pixel density of a common target device (443 ppi on each axis).
pub const COMMON_DEVICE_DIAGONAL_PPI: f64 = 443.0 * std::f64::consts::SQRT_2;

/// Factor by which the final size is oversampled while rendering.
pub const RENDER_OVERSAMPLING: u32 = 5;

/// Largest width or height, in pixels, of the oversampled render surface.
pub const MAX_RENDER_DIMENSION: u32 = 16_384;

static SIZE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_height_(\d+(?:d\d+)?)_width_(\d+(?:d\d+)?)")
        .expect("size hint pattern is valid")
});

/// Width and height in authoring pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeHint {
    pub width: f64,
    pub height: f64,
}

/// Reads the `_height_<h>_width_<w>` hint that authoring tools embed in filenames.
///
/// A `d` inside a number stands for the decimal point (`12d5` is 12.5).
pub fn parse_size_hint(filename: &str) -> Option<SizeHint> {
    let captures = SIZE_HINT.captures(filename)?;
    let number = |index| -> Option<f64> { captures.get(index)?.as_str().replace('d', ".").parse().ok() };
    Some(SizeHint {
        width: number(2)?,
        height: number(1)?,
    })
}

/// Multiplier from authoring pixels to device-independent pixels.
pub fn density_conversion_factor() -> f64 {
    (COMMON_DEVICE_DIAGONAL_PPI / REFERENCE_MONITOR_PPI) * RELATIVE_SIZE_ADJUSTMENT_FACTOR
}

/// Final pixel size for an image of authoring size `hint`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn target_pixel_size(hint: SizeHint, factor: f64) -> (u32, u32) {
    let scale = |value: f64| (value * factor).round().max(1.0) as u32;
    (scale(hint.width), scale(hint.height))
}
