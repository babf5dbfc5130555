use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::configuration::config::Config;
use crate::configuration::types::StorageBackend;
use crate::error_handling::types::*;
use crate::session_pairing::{pair_sessions, PairingSummary, SessionPair};
use crate::storage::{BlobStoreLister, DirectoryLister, ObjectFilter, ObjectLister, StorageObject};
use crate::web_interface::web_server::WebServer;

/// URL prefix under which the directory backend's files are served.
const FILES_URL_PREFIX: &str = "/files";

/// Owns the validated configuration and the listing backend built from it.
pub struct Controller {
    pub config: Config,
    lister: Arc<dyn ObjectLister>,
}

impl Controller {
    pub fn new(config: Config) -> Result<Self, ControllerError> {
        let lister = Self::build_lister(&config)?;
        info!("Using {}", lister.describe());
        Ok(Self { config, lister })
    }

    fn build_lister(config: &Config) -> Result<Arc<dyn ObjectLister>, ControllerError> {
        let storage = &config.storage;
        let filter = ObjectFilter::by_prefix(storage.prefix.clone().unwrap_or_default());
        match storage.backend {
            StorageBackend::Blob => {
                let token = storage.blob.token.clone().ok_or_else(|| {
                    ControllerError::ConfigurationError(ConfigError::MissingValue("storage.blob.token".to_string()))
                })?;
                let lister = BlobStoreLister::new(
                    storage.blob.endpoint.clone(),
                    token,
                    storage.blob.limit,
                    Duration::from_secs(storage.blob.request_timeout_secs),
                    filter,
                )?;
                Ok(Arc::new(lister))
            }
            StorageBackend::Directory => {
                let dir = storage.directory.as_ref().ok_or_else(|| {
                    ControllerError::ConfigurationError(ConfigError::MissingValue("storage.directory.path".to_string()))
                })?;
                // absolute so `list`/`pairs` output stays usable outside the browser
                let base_url = format!("{}{}", config.public_url(), FILES_URL_PREFIX);
                Ok(Arc::new(DirectoryLister::new(&dir.path, base_url, filter)?))
            }
        }
    }

    /// Serves the dashboard until the process is stopped.
    pub async fn run(&self) -> Result<(), ControllerError> {
        info!("Starting the dashboard");
        let addr = WebServer::socket_addr(&self.config.web.bind_address, self.config.web.port)?;
        let mut server = WebServer::new(self.lister.clone());
        if self.config.storage.backend == StorageBackend::Directory {
            if let Some(ref dir) = self.config.storage.directory {
                server = server.with_files_root(dir.path.clone());
            }
        }
        server.start(addr).await.map_err(|e| {
            error!("Web server stopped: {}", e);
            ControllerError::WebError(e)
        })
    }

    pub async fn list_objects(&self) -> Result<Vec<StorageObject>, ControllerError> {
        Ok(self.lister.list().await?)
    }

    pub async fn session_pairs(&self) -> Result<(Vec<SessionPair>, PairingSummary), ControllerError> {
        let objects = self.list_objects().await?;
        let pairs = pair_sessions(&objects);
        let summary = PairingSummary::from_pairs(&pairs);
        debug!("{:?}", summary);
        Ok((pairs, summary))
    }
}
