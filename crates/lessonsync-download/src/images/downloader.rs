//! Concurrent image fetching.

use std::path::Path;
use std::sync::Arc;

use lessonsync_core::{ImageStorePort, SyncEvent, SyncEventEmitterPort, SyncPhase};
use lessonsync_image::ImageRepairer;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::placement::ImagePlacement;
use super::{DownloadedImage, ImageDownloadReport, ImageReference};
use crate::error::{SyncError, SyncResult};

/// Default number of images fetched at once.
pub const DEFAULT_IMAGE_CONCURRENCY: usize = 8;

/// Downloads, repairs and places referenced images.
pub struct ImageDownloader {
    store: Arc<dyn ImageStorePort>,
    repairer: Arc<ImageRepairer>,
    concurrency: usize,
}

impl ImageDownloader {
    pub fn new(store: Arc<dyn ImageStorePort>) -> Self {
        Self {
            store,
            repairer: Arc::new(ImageRepairer::new()),
            concurrency: DEFAULT_IMAGE_CONCURRENCY,
        }
    }

    #[must_use]
    pub fn with_repairer(mut self, repairer: ImageRepairer) -> Self {
        self.repairer = Arc::new(repairer);
        self
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Download every reference into `dest_dir`, which is cleared first.
    ///
    /// Missing images are reported as [`DownloadedImage::FailedCouldNotFind`];
    /// store errors and repair failures abort the whole download.
    pub async fn download_all(
        &self,
        references: &[ImageReference],
        dest_dir: &Path,
        emitter: &Arc<dyn SyncEventEmitterPort>,
    ) -> SyncResult<ImageDownloadReport> {
        if tokio::fs::try_exists(dest_dir)
            .await
            .map_err(|e| SyncError::io(dest_dir, e))?
        {
            tokio::fs::remove_dir_all(dest_dir)
                .await
                .map_err(|e| SyncError::io(dest_dir, e))?;
        }
        tokio::fs::create_dir_all(dest_dir)
            .await
            .map_err(|e| SyncError::io(dest_dir, e))?;

        let total = references.len() as u64;
        emitter.emit(SyncEvent::PhaseStarted {
            phase: SyncPhase::Images,
            total,
        });

        let placement = Arc::new(Mutex::new(ImagePlacement::new(
            dest_dir.to_path_buf(),
            Arc::clone(&self.repairer),
        )));
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        for (index, reference) in references.iter().cloned().enumerate() {
            let store = Arc::clone(&self.store);
            let repairer = Arc::clone(&self.repairer);
            let placement = Arc::clone(&placement);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| SyncError::TaskFailed {
                        message: e.to_string(),
                    })?;
                let image = download_one(store, repairer, placement, &reference).await?;
                Ok::<_, SyncError>((index, reference, image))
            });
        }

        let mut slots: Vec<Option<(ImageReference, DownloadedImage)>> =
            vec![None; references.len()];
        let mut finished = 0;
        while let Some(joined) = tasks.join_next().await {
            let (index, reference, image) = joined.map_err(|e| SyncError::TaskFailed {
                message: e.to_string(),
            })??;
            slots[index] = Some((reference, image));
            finished += 1;
            emitter.emit(SyncEvent::Progress {
                phase: SyncPhase::Images,
                finished,
                total,
            });
        }
        emitter.emit(SyncEvent::PhaseFinished {
            phase: SyncPhase::Images,
        });

        let report = ImageDownloadReport {
            images: slots.into_iter().flatten().collect(),
        };
        info!(
            count = report.images.len(),
            dir = %dest_dir.display(),
            "Downloaded images"
        );
        Ok(report)
    }
}

async fn download_one(
    store: Arc<dyn ImageStorePort>,
    repairer: Arc<ImageRepairer>,
    placement: Arc<Mutex<ImagePlacement>>,
    reference: &ImageReference,
) -> SyncResult<DownloadedImage> {
    let fetched = store
        .fetch_image(&reference.location())
        .await
        .map_err(|source| SyncError::ImageFetch {
            filename: reference.filename.clone(),
            source,
        })?;
    let Some(contents) = fetched else {
        warn!(
            filename = %reference.filename,
            entity_id = %reference.container.entity_id,
            "Image could not be found"
        );
        return Ok(DownloadedImage::FailedCouldNotFind);
    };

    let filename = reference.filename.clone();
    tokio::task::spawn_blocking(move || {
        let repaired = repairer.convert_to_png(&filename, &contents)?;
        placement.blocking_lock().place(&filename, contents, repaired)
    })
    .await
    .map_err(|e| SyncError::TaskFailed {
        message: e.to_string(),
    })?
}
