use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind_address: String,
    pub port: u16,
    /// Base URL under which the dashboard is reachable, used to build object URLs
    /// for the directory backend. Derived from `bind_address` and `port` when unset.
    pub public_url: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: String::from("127.0.0.1"),
            port: 8080,
            public_url: None,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Blob,
    Directory,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct BlobConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub limit: u32,
    pub request_timeout_secs: u64,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            endpoint: String::from("https://blob.vercel-storage.com"),
            token: None,
            limit: 1000,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub path: PathBuf,
}

#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub prefix: Option<String>,
    pub blob: BlobConfig,
    pub directory: Option<DirectoryConfig>,
}
