//! Object listing subsystem
//!
//! This module provides the abstraction the dashboard uses to obtain a flat
//! list of stored objects, and the backends implementing it.
//!
//! Components:
//! - `storage_trait`: the `ObjectLister` trait defining a uniform API.
//! - `types`: `StorageObject`, the immutable snapshot returned by a listing.
//! - `blob_lister`: HTTP client for a hosted blob store list endpoint.
//! - `directory_lister`: local directory backend for development and inspection.
//! - `object_filter`: prefix filter applied by every backend.

pub mod blob_lister;
pub mod directory_lister;
pub mod object_filter;
pub mod storage_trait;
pub mod types;

pub use blob_lister::BlobStoreLister;
pub use directory_lister::DirectoryLister;
pub use object_filter::ObjectFilter;
pub use storage_trait::ObjectLister;
pub use types::StorageObject;
