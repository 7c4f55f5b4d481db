//! Port for the image asset store.

use async_trait::async_trait;
use thiserror::Error;

use crate::structure::ImageLocation;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    /// Network or connectivity error.
    #[error("Network error fetching {filename}: {message}")]
    Network {
        /// The image being fetched
        filename: String,
        /// Description of the network error
        message: String,
    },

    /// The store answered with an unexpected status.
    #[error("Image store returned status {status} for {filename}")]
    UnexpectedStatus {
        /// The image being fetched
        filename: String,
        /// HTTP status code
        status: u16,
    },
}

pub type ImageStoreResult<T> = Result<T, ImageStoreError>;

/// Port for downloading image assets.
#[async_trait]
pub trait ImageStorePort: Send + Sync {
    /// Fetch the raw bytes of an image, or `None` if the store has no such file.
    async fn fetch_image(&self, location: &ImageLocation) -> ImageStoreResult<Option<Vec<u8>>>;

    /// Where `location` is fetched from, for reports. `None` if not addressable.
    fn image_url(&self, _location: &ImageLocation) -> Option<String> {
        None
    }
}
