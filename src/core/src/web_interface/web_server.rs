use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;
use warp::Filter;

use super::routes::routes;
use crate::error_handling::types::WebError;
use crate::storage::storage_trait::ObjectLister;

/// Web server for the JSON API and the dashboard page
pub struct WebServer {
    lister: Arc<dyn ObjectLister>,
    files_root: Option<PathBuf>,
}

impl WebServer {
    /// Create a new WebServer instance
    pub fn new(lister: Arc<dyn ObjectLister>) -> Self {
        Self {
            lister,
            files_root: None,
        }
    }

    /// Serve the objects of a local directory under `/files`
    pub fn with_files_root(mut self, root: PathBuf) -> Self {
        self.files_root = Some(root);
        self
    }

    pub fn socket_addr(bind_address: &str, port: u16) -> Result<SocketAddr, WebError> {
        let ip: IpAddr = bind_address
            .parse()
            .map_err(|e| WebError::BindFailed(format!("invalid bind address '{}': {}", bind_address, e)))?;
        Ok(SocketAddr::new(ip, port))
    }

    /// Start the web server on the given address
    pub async fn start(&self, addr: SocketAddr) -> Result<(), WebError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            error!("Unable to bind the web server to {}: {}", addr, e);
            WebError::BindFailed(format!("{}: {}", addr, e))
        })?;

        let routes = routes(self.lister.clone(), self.files_root.clone()).with(warp::log("bugdash::web"));

        info!("Dashboard listening on http://{} ({})", addr, self.lister.describe());
        warp::serve(routes).incoming(listener).run().await;

        Ok(())
    }
}
