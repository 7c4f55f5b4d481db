//! Image download pipeline.
//!
//! References are collected from the downloaded content, fetched from the
//! image store with bounded concurrency, repaired on blocking threads and then
//! placed into a single output directory one at a time.

mod downloader;
mod placement;
mod reference;
mod replacements;

pub use downloader::{DEFAULT_IMAGE_CONCURRENCY, ImageDownloader};
pub use reference::{ImageContainer, ImageReference, collect_image_references};

/// What happened to one referenced image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadedImage {
    Succeeded,
    /// An identical image was already placed under the same name.
    Duplicated,
    /// Stored under a different name, either to avoid a conflicting image or
    /// because an identical converted copy already existed.
    Renamed {
        old_filename: String,
        new_filename: String,
    },
    ConvertedSvgToPng {
        new_filename: String,
        width: u32,
        height: u32,
    },
    ConvertedGifToPng {
        new_filename: String,
    },
    FailedCouldNotFind,
}

impl DownloadedImage {
    /// The `(old, new)` filename pair content must be rewritten with, if any.
    pub fn replacement<'a>(&'a self, original_filename: &'a str) -> Option<(&'a str, &'a str)> {
        match self {
            Self::Renamed {
                old_filename,
                new_filename,
            } => Some((old_filename.as_str(), new_filename.as_str())),
            Self::ConvertedSvgToPng { new_filename, .. }
            | Self::ConvertedGifToPng { new_filename } => {
                Some((original_filename, new_filename.as_str()))
            }
            Self::Succeeded | Self::Duplicated | Self::FailedCouldNotFind => None,
        }
    }
}

/// Outcome of downloading every referenced image, in reference order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDownloadReport {
    pub images: Vec<(ImageReference, DownloadedImage)>,
}

/// Per-outcome image counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    pub total: usize,
    pub succeeded: usize,
    pub duplicated: usize,
    pub renamed: usize,
    pub converted_svg: usize,
    pub converted_gif: usize,
    pub missing: usize,
}

impl ImageDownloadReport {
    pub fn stats(&self) -> ImageStats {
        let mut stats = ImageStats {
            total: self.images.len(),
            ..ImageStats::default()
        };
        for (_, image) in &self.images {
            let counter = match image {
                DownloadedImage::Succeeded => &mut stats.succeeded,
                DownloadedImage::Duplicated => &mut stats.duplicated,
                DownloadedImage::Renamed { .. } => &mut stats.renamed,
                DownloadedImage::ConvertedSvgToPng { .. } => &mut stats.converted_svg,
                DownloadedImage::ConvertedGifToPng { .. } => &mut stats.converted_gif,
                DownloadedImage::FailedCouldNotFind => &mut stats.missing,
            };
            *counter += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use lessonsync_core::LanguageType;
    use lessonsync_core::structure::{ImageContainerType, ImageType};

    use super::*;

    fn reference(filename: &str) -> ImageReference {
        ImageReference {
            container: ImageContainer {
                container_type: ImageContainerType::Topic,
                entity_id: "topic".to_string(),
                language: LanguageType::English,
            },
            image_type: ImageType::HtmlImage,
            filename: filename.to_string(),
        }
    }

    #[test]
    fn test_stats_count_each_outcome() {
        let report = ImageDownloadReport {
            images: vec![
                (reference("a.png"), DownloadedImage::Succeeded),
                (reference("a.png"), DownloadedImage::Duplicated),
                (
                    reference("b.gif"),
                    DownloadedImage::ConvertedGifToPng {
                        new_filename: "b.png".to_string(),
                    },
                ),
                (reference("c.png"), DownloadedImage::FailedCouldNotFind),
            ],
        };

        let stats = report.stats();

        assert_eq!(stats.total, 4);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.duplicated, 1);
        assert_eq!(stats.converted_gif, 1);
        assert_eq!(stats.missing, 1);
        assert_eq!(stats.renamed, 0);
    }

    #[test]
    fn test_replacement_pairs() {
        let converted = DownloadedImage::ConvertedSvgToPng {
            new_filename: "x.png".to_string(),
            width: 1,
            height: 1,
        };
        assert_eq!(converted.replacement("x.svg"), Some(("x.svg", "x.png")));
        assert_eq!(DownloadedImage::Duplicated.replacement("x.svg"), None);
    }
}
