//! Object Lister Trait
//!
//! This module defines the `ObjectLister` trait, the single capability the
//! dashboard needs from a storage platform: a fresh, flat list of objects.
//!
//! Implementors are responsible for:
//! - Querying their backend on every call (no caching)
//! - Translating backend failures into `StorageError::Unavailable`
//!
//! A failed listing is never reported as an empty list.

use async_trait::async_trait;

use crate::error_handling::types::StorageError;
use crate::storage::types::StorageObject;

/// The `ObjectLister` trait defines the interface for object listing backends.
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Lists every stored object visible to this backend.
    async fn list(&self) -> Result<Vec<StorageObject>, StorageError>;

    /// Human readable description of the backend, used in logs.
    fn describe(&self) -> String;
}
