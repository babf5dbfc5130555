use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error, info};

use crate::error_handling::types::StorageError;
use crate::storage::object_filter::ObjectFilter;
use crate::storage::storage_trait::ObjectLister;
use crate::storage::types::StorageObject;

/// Lists the files below a local directory as storage objects.
///
/// Pathnames are `/`-joined and relative to the root, URLs are built by
/// appending the pathname to `base_url`. Hidden entries are skipped and the
/// result is sorted by pathname so repeated listings are stable.
pub struct DirectoryLister {
    root: PathBuf,
    base_url: String,
    filter: ObjectFilter,
}

impl DirectoryLister {
    pub fn new<P: AsRef<Path>, U: Into<String>>(root: P, base_url: U, filter: ObjectFilter) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            error!("Object directory {} does not exist", root.display());
            return Err(StorageError::InvalidConfig(format!("{} is not a directory", root.display())));
        }
        info!("DirectoryLister initialized at {}", root.display());
        Ok(Self {
            root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            filter,
        })
    }

    fn object_url(base_url: &str, pathname: &str) -> String {
        format!("{}/{}", base_url, pathname)
    }

    fn relative_pathname(root: &Path, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(root).ok()?;
        let parts: Vec<&str> = rel.iter().map(|c| c.to_str()).collect::<Option<_>>()?;
        Some(parts.join("/"))
    }

    fn walk(root: &Path, dir: &Path, base_url: &str, out: &mut Vec<StorageObject>) -> Result<(), StorageError> {
        let entries = fs::read_dir(dir).map_err(|e| {
            error!("Failed to read directory {}: {}", dir.display(), e);
            StorageError::Unavailable(format!("cannot read {}: {}", dir.display(), e))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| {
                error!("Dir entry error: {}", e);
                StorageError::Unavailable(e.to_string())
            })?;
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let path = entry.path();
            let metadata = entry.metadata().map_err(|e| {
                error!("Failed to stat {}: {}", path.display(), e);
                StorageError::Unavailable(e.to_string())
            })?;
            if metadata.is_dir() {
                Self::walk(root, &path, base_url, out)?;
                continue;
            }
            // non UTF-8 names cannot be expressed as object pathnames
            let Some(pathname) = Self::relative_pathname(root, &path) else {
                debug!("Skipping non UTF-8 path {}", path.display());
                continue;
            };
            out.push(StorageObject {
                url: Self::object_url(base_url, &pathname),
                download_url: None,
                size: Some(metadata.len()),
                uploaded_at: metadata.modified().ok().map(DateTime::<Utc>::from),
                pathname,
            });
        }
        Ok(())
    }

    fn list_blocking(root: &Path, base_url: &str, filter: &ObjectFilter) -> Result<Vec<StorageObject>, StorageError> {
        let mut objects = Vec::new();
        Self::walk(root, root, base_url, &mut objects)?;
        objects.sort_by(|a, b| a.pathname.cmp(&b.pathname));
        Ok(filter.apply(objects))
    }
}

#[async_trait]
impl ObjectLister for DirectoryLister {
    async fn list(&self) -> Result<Vec<StorageObject>, StorageError> {
        let root = self.root.clone();
        let base_url = self.base_url.clone();
        let filter = self.filter.clone();
        let objects = tokio::task::spawn_blocking(move || Self::list_blocking(&root, &base_url, &filter))
            .await
            .map_err(|e| {
                error!("Directory listing task failed: {}", e);
                StorageError::Unavailable(e.to_string())
            })??;
        info!("Listed {} object(s) from {}", objects.len(), self.root.display());
        Ok(objects)
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}
