//! Image asset store backed by a storage bucket.

use url::Url;

use crate::config::GaeClientConfig;
use crate::error::GaeResult;
use crate::http::{HttpBackend, ReqwestBackend};

/// Default image store using the reqwest HTTP backend.
pub type DefaultGcsImageStore = GcsImageStore<ReqwestBackend>;

/// Reads lesson images from `{gcs_base_url}/{bucket}/...`.
pub struct GcsImageStore<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) gcs_base_url: Url,
    pub(crate) bucket: String,
}

impl DefaultGcsImageStore {
    pub fn new(config: &GaeClientConfig) -> GaeResult<Self> {
        Ok(Self {
            backend: ReqwestBackend::new(config)?,
            gcs_base_url: Url::parse(&config.gcs_base_url)?,
            bucket: config.gcs_bucket.clone(),
        })
    }
}

impl<B: HttpBackend> GcsImageStore<B> {
    #[cfg(test)]
    pub(crate) fn with_backend(backend: B, gcs_base_url: Url, bucket: &str) -> Self {
        Self {
            backend,
            gcs_base_url,
            bucket: bucket.to_string(),
        }
    }
}
