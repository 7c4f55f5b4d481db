//! HTTP adapter for the lesson content backend.
//!
//! Implements the core `LessonEndpointPort` (topic list and topic content
//! endpoints, authenticated with an API secret) and `ImageStorePort` (lesson
//! images in a storage bucket) over an injectable HTTP backend.
#![deny(unused_crate_dependencies)]
// DefaultGaeClient is used through the port traits, not its generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod debug;
mod endpoints;
mod error;
mod http;
mod image_store;
mod port;

// ============================================================================
// Public API
// ============================================================================

pub use client::DefaultGaeClient;
pub use config::GaeClientConfig;
pub use error::{GaeError, GaeResult};
pub use image_store::DefaultGcsImageStore;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;
