//! Serialized placement of downloaded images into the output directory.
//!
//! Several references can share a filename while holding different bytes, so
//! every write goes through one [`ImagePlacement`] that decides whether an
//! image is new, a duplicate, or needs a unique name.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use lessonsync_image::{ImageRepairer, RepairedImage};
use tracing::debug;

use super::DownloadedImage;
use crate::error::{SyncError, SyncResult};

pub(crate) struct ImagePlacement {
    dir: PathBuf,
    written: HashMap<String, Vec<u8>>,
    repairer: Arc<ImageRepairer>,
}

enum Placed {
    /// An identical converted image already existed under this name.
    Reused(String),
    Written(String),
}

impl ImagePlacement {
    pub(crate) fn new(dir: PathBuf, repairer: Arc<ImageRepairer>) -> Self {
        Self {
            dir,
            written: HashMap::new(),
            repairer,
        }
    }

    pub(crate) fn place(
        &mut self,
        filename: &str,
        original: Vec<u8>,
        repaired: RepairedImage,
    ) -> SyncResult<DownloadedImage> {
        let outcome = match repaired {
            RepairedImage::NoRepairNeeded => {
                if !self.exists(filename) {
                    self.write(filename, original)?;
                    DownloadedImage::Succeeded
                } else if self.is_same(filename, &original)? {
                    DownloadedImage::Duplicated
                } else {
                    let new_filename = self.unique_name(filename)?;
                    self.write(&new_filename, original)?;
                    DownloadedImage::Renamed {
                        old_filename: filename.to_string(),
                        new_filename,
                    }
                }
            }
            RepairedImage::RenderedSvg {
                png_contents,
                width,
                height,
            } => match self.place_converted(filename, png_contents)? {
                Placed::Reused(new_filename) => DownloadedImage::Renamed {
                    old_filename: filename.to_string(),
                    new_filename,
                },
                Placed::Written(new_filename) => DownloadedImage::ConvertedSvgToPng {
                    new_filename,
                    width,
                    height,
                },
            },
            RepairedImage::ConvertedFromGif { png_contents } => {
                match self.place_converted(filename, png_contents)? {
                    Placed::Reused(new_filename) => DownloadedImage::Renamed {
                        old_filename: filename.to_string(),
                        new_filename,
                    },
                    Placed::Written(new_filename) => {
                        DownloadedImage::ConvertedGifToPng { new_filename }
                    }
                }
            }
        };
        debug!(filename, ?outcome, "Placed image");
        Ok(outcome)
    }

    fn place_converted(&mut self, filename: &str, png_contents: Vec<u8>) -> SyncResult<Placed> {
        let expected = format!("{}.png", split_extension(filename).0);
        let target = if !self.exists(&expected) {
            expected
        } else if self.is_same(&expected, &png_contents)? {
            return Ok(Placed::Reused(expected));
        } else {
            self.unique_name(&expected)?
        };
        self.write(&target, png_contents)?;
        Ok(Placed::Written(target))
    }

    fn exists(&self, filename: &str) -> bool {
        self.written.contains_key(filename) || self.dir.join(filename).exists()
    }

    /// Byte equality first, then pixel equality for decodable formats.
    fn is_same(&self, filename: &str, contents: &[u8]) -> SyncResult<bool> {
        let existing: Cow<'_, [u8]> = match self.written.get(filename) {
            Some(bytes) => Cow::Borrowed(bytes),
            None => {
                let path = self.dir.join(filename);
                Cow::Owned(std::fs::read(&path).map_err(|e| SyncError::io(path, e))?)
            }
        };
        if existing.as_ref() == contents {
            return Ok(true);
        }
        let (_, extension) = split_extension(filename);
        Ok(self
            .repairer
            .are_equal_images(extension.unwrap_or_default(), &existing, contents))
    }

    /// `{stem}_{n}.{ext}` where `n` is one more than the number of files whose
    /// stem starts with `stem`, bumped until unused.
    fn unique_name(&self, filename: &str) -> SyncResult<String> {
        let (stem, extension) = split_extension(filename);
        let entries = std::fs::read_dir(&self.dir).map_err(|e| SyncError::io(&self.dir, e))?;
        let mut copy_count = 1;
        for entry in entries {
            let entry = entry.map_err(|e| SyncError::io(&self.dir, e))?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if split_extension(&name).0.starts_with(stem) {
                copy_count += 1;
            }
        }
        loop {
            let candidate = match extension {
                Some(extension) => format!("{stem}_{copy_count}.{extension}"),
                None => format!("{stem}_{copy_count}"),
            };
            if !self.exists(&candidate) {
                return Ok(candidate);
            }
            copy_count += 1;
        }
    }

    fn write(&mut self, filename: &str, contents: Vec<u8>) -> SyncResult<()> {
        let path = self.dir.join(filename);
        std::fs::write(&path, &contents).map_err(|e| SyncError::io(path, e))?;
        self.written.insert(filename.to_string(), contents);
        Ok(())
    }
}

fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, Some(extension)),
        _ => (filename, None),
    }
}
