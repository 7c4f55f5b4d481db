//! Filename replacements for converted structures.

use std::collections::{BTreeMap, BTreeSet};

use lessonsync_convert::ImageReplacements;
use lessonsync_core::structure::ImageContainerType;

use super::ImageDownloadReport;
use crate::error::{SyncError, SyncResult};

impl ImageDownloadReport {
    /// Old → new filenames for images referenced from one container.
    ///
    /// Fails when one old name was placed under several new names, or when a
    /// new name is itself replaced.
    pub fn compute_replacements(
        &self,
        container_type: ImageContainerType,
        entity_id: &str,
    ) -> SyncResult<ImageReplacements> {
        let mut candidates: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let pairs = self
            .images
            .iter()
            .filter(|(reference, _)| {
                reference.container.container_type == container_type
                    && reference.container.entity_id == entity_id
            })
            .filter_map(|(reference, image)| image.replacement(&reference.filename));
        for (old_filename, new_filename) in pairs {
            candidates.entry(old_filename).or_default().insert(new_filename);
        }

        let mut replacements = ImageReplacements::new();
        for (old_filename, new_filenames) in candidates {
            let mut new_filenames = new_filenames.into_iter();
            match (new_filenames.next(), new_filenames.next()) {
                (Some(new_filename), None) => {
                    replacements.insert(old_filename.to_string(), new_filename.to_string());
                }
                (first, second) => {
                    return Err(SyncError::ConflictingImageReplacements {
                        filename: old_filename.to_string(),
                        candidates: first
                            .into_iter()
                            .chain(second)
                            .chain(new_filenames)
                            .map(ToString::to_string)
                            .collect(),
                    });
                }
            }
        }

        let chained: Vec<String> = replacements
            .keys()
            .filter(|old| replacements.values().any(|new| new == *old))
            .cloned()
            .collect();
        if !chained.is_empty() {
            return Err(SyncError::ChainedImageReplacements { filenames: chained });
        }
        Ok(replacements)
    }
}

#[cfg(test)]
mod tests {
    use lessonsync_core::LanguageType;
    use lessonsync_core::structure::ImageType;

    use super::*;
    use crate::images::{DownloadedImage, ImageContainer, ImageReference};

    fn reference(
        container_type: ImageContainerType,
        entity_id: &str,
        language: LanguageType,
        filename: &str,
    ) -> ImageReference {
        ImageReference {
            container: ImageContainer {
                container_type,
                entity_id: entity_id.to_string(),
                language,
            },
            image_type: ImageType::HtmlImage,
            filename: filename.to_string(),
        }
    }

    fn renamed(old: &str, new: &str) -> DownloadedImage {
        DownloadedImage::Renamed {
            old_filename: old.to_string(),
            new_filename: new.to_string(),
        }
    }

    #[test]
    fn test_replacements_are_scoped_to_container() {
        let report = ImageDownloadReport {
            images: vec![
                (
                    reference(ImageContainerType::Exploration, "exp_1", LanguageType::English, "a.svg"),
                    DownloadedImage::ConvertedSvgToPng {
                        new_filename: "a.png".to_string(),
                        width: 4,
                        height: 4,
                    },
                ),
                (
                    reference(ImageContainerType::Exploration, "exp_1", LanguageType::Arabic, "a.svg"),
                    renamed("a.svg", "a.png"),
                ),
                (
                    reference(ImageContainerType::Exploration, "exp_1", LanguageType::English, "b.png"),
                    DownloadedImage::Succeeded,
                ),
                (
                    reference(ImageContainerType::Exploration, "exp_2", LanguageType::English, "c.png"),
                    renamed("c.png", "c_2.png"),
                ),
                (
                    reference(ImageContainerType::Skill, "exp_1", LanguageType::English, "d.png"),
                    renamed("d.png", "d_2.png"),
                ),
            ],
        };

        let replacements = report
            .compute_replacements(ImageContainerType::Exploration, "exp_1")
            .unwrap();

        assert_eq!(
            replacements,
            ImageReplacements::from([("a.svg".to_string(), "a.png".to_string())])
        );
    }

    #[test]
    fn test_conflicting_replacements_fail() {
        let report = ImageDownloadReport {
            images: vec![
                (
                    reference(ImageContainerType::Topic, "t", LanguageType::English, "a.png"),
                    renamed("a.png", "a_2.png"),
                ),
                (
                    reference(ImageContainerType::Topic, "t", LanguageType::Arabic, "a.png"),
                    renamed("a.png", "a_3.png"),
                ),
            ],
        };

        let err = report
            .compute_replacements(ImageContainerType::Topic, "t")
            .unwrap_err();

        assert!(matches!(
            err,
            SyncError::ConflictingImageReplacements { filename, candidates }
                if filename == "a.png" && candidates == ["a_2.png", "a_3.png"]
        ));
    }

    #[test]
    fn test_chained_replacements_fail() {
        let report = ImageDownloadReport {
            images: vec![
                (
                    reference(ImageContainerType::Story, "s", LanguageType::English, "a.gif"),
                    DownloadedImage::ConvertedGifToPng {
                        new_filename: "a.png".to_string(),
                    },
                ),
                (
                    reference(ImageContainerType::Story, "s", LanguageType::English, "a.png"),
                    renamed("a.png", "a_2.png"),
                ),
            ],
        };

        let err = report
            .compute_replacements(ImageContainerType::Story, "s")
            .unwrap_err();

        assert!(matches!(
            err,
            SyncError::ChainedImageReplacements { filenames } if filenames == ["a.png"]
        ));
    }
}
