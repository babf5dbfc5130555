pub mod config;
pub mod types;

pub use config::{CliOverrides, Config};
pub use types::{BlobConfig, DirectoryConfig, StorageBackend, StorageConfig, WebConfig};
