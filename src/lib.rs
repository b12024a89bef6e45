//! image-uploads - accepts image uploads over HTTP and records their metadata
//!
//! This crate provides:
//! - A validation pipeline (content-type policy, size ceiling) returning an
//!   explicit success/failure [`outcome::Outcome`]
//! - redb embedded database for upload records (ACID, crash-safe)
//! - A remote storage seam with a placeholder backend
//! - REST API with multipart upload support

pub mod api;
pub mod config;
pub mod object_store;
pub mod outcome;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod upload;

use config::Config;
use upload::UploadPipeline;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub pipeline: UploadPipeline,
}
