//! Client for the Android content endpoints of the lesson backend.

use std::sync::Arc;

use lessonsync_core::{SyncEvent, SyncEventEmitterPort, SyncPhase};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::GaeClientConfig;
use crate::debug::ApiDebugRecorder;
use crate::error::{GaeError, GaeResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::endpoints::build_endpoint_url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default backend client using the reqwest HTTP backend.
pub type DefaultGaeClient = GaeClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the lesson backend, generic over its HTTP backend.
///
/// Use [`DefaultGaeClient`] in production code and interact with it through
/// the `LessonEndpointPort` trait.
pub struct GaeClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
    pub(crate) debug: ApiDebugRecorder,
}

impl DefaultGaeClient {
    /// Create a client from `config`.
    ///
    /// The API debug directory, when configured, is created if missing.
    pub fn new(config: &GaeClientConfig) -> GaeResult<Self> {
        if let Some(dir) = &config.api_debug_dir {
            std::fs::create_dir_all(dir).map_err(|source| GaeError::DebugWrite {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Self {
            backend: ReqwestBackend::new(config)?,
            base_url: Url::parse(&config.base_url)?,
            debug: ApiDebugRecorder::new(config.api_debug_dir.clone()),
        })
    }
}

impl<B: HttpBackend> GaeClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(backend: B, base_url: Url, debug: ApiDebugRecorder) -> Self {
        Self {
            backend,
            base_url,
            debug,
        }
    }

    /// POST `request` to `endpoint` and decode the response.
    ///
    /// Raw bodies are recorded in the debug directory before decoding so a
    /// malformed response can still be inspected.
    pub(crate) async fn call<Req, Resp>(
        &self,
        endpoint: &str,
        request: &Req,
        phase: SyncPhase,
        emitter: &Arc<dyn SyncEventEmitterPort>,
    ) -> GaeResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = build_endpoint_url(&self.base_url, endpoint)?;
        let body = serde_json::to_string_pretty(request)?;
        self.debug.record(endpoint, "request", &body).await?;

        emitter.emit(SyncEvent::Progress {
            phase,
            finished: 0,
            total: 1,
        });
        let response = self.backend.post_json(&url, &body).await?;
        self.debug.record(endpoint, "response", &response).await?;
        emitter.emit(SyncEvent::Progress {
            phase,
            finished: 1,
            total: 1,
        });

        debug!(
            endpoint,
            request_bytes = body.len(),
            response_bytes = response.len(),
            "Backend call finished"
        );
        Ok(serde_json::from_str(&response)?)
    }
}
