//! HTTP backend for a hosted blob store.
//!
//! `BlobStoreLister` issues a single authenticated `GET` against the store's
//! list endpoint and returns the objects of the first page. The store answers
//! with `{ "blobs": [...], "cursor": "...", "hasMore": bool }`; when more pages
//! exist the listing is truncated and a warning is logged.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::Client;

use crate::error_handling::types::StorageError;
use crate::storage::object_filter::ObjectFilter;
use crate::storage::storage_trait::ObjectLister;
use crate::storage::types::{ListBlobResult, StorageObject};

pub struct BlobStoreLister {
    client: Client,
    endpoint: String,
    token: String,
    limit: u32,
    filter: ObjectFilter,
}

impl BlobStoreLister {
    pub const DEFAULT_ENDPOINT: &'static str = "https://blob.vercel-storage.com";
    pub const MAX_LIMIT: u32 = 1000;

    pub fn new<E: Into<String>, T: Into<String>>(
        endpoint: E,
        token: T,
        limit: u32,
        timeout: Duration,
        filter: ObjectFilter,
    ) -> Result<Self, StorageError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(StorageError::InvalidConfig("blob store token is empty".to_string()));
        }
        if limit == 0 || limit > Self::MAX_LIMIT {
            return Err(StorageError::InvalidConfig(format!(
                "list limit must be within 1..={}, got {}",
                Self::MAX_LIMIT,
                limit
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bugdash/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                error!("Failed to build HTTP client: {}", e);
                StorageError::InvalidConfig(e.to_string())
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token,
            limit,
            filter,
        })
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("limit", self.limit.to_string())];
        if let Some(ref prefix) = self.filter.prefix {
            query.push(("prefix", prefix.clone()));
        }
        query
    }
}

#[async_trait]
impl ObjectLister for BlobStoreLister {
    async fn list(&self) -> Result<Vec<StorageObject>, StorageError> {
        debug!("Listing blobs from {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .bearer_auth(&self.token)
            .query(&self.query())
            .send()
            .await
            .map_err(|e| {
                error!("Blob list request to {} failed: {}", self.endpoint, e);
                StorageError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Blob store answered {} for list request", status);
            return Err(StorageError::Unavailable(format!("blob store returned status {}", status)));
        }

        let page: ListBlobResult = response.json().await.map_err(|e| {
            error!("Unable to decode blob list response: {}", e);
            StorageError::Unavailable(format!("invalid list response: {}", e))
        })?;

        if page.has_more {
            warn!(
                "Blob listing truncated to the first {} object(s), next cursor {} not fetched",
                page.blobs.len(),
                page.cursor.as_deref().unwrap_or("<none>")
            );
        }

        let objects = self.filter.apply(page.blobs);
        info!("Listed {} object(s) from {}", objects.len(), self.endpoint);
        Ok(objects)
    }

    fn describe(&self) -> String {
        format!("blob store at {}", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;
    use tokio_test::{assert_err, assert_ok};

    // Answers exactly one HTTP request with the given status line and body, and hands back the
    // raw request head so tests can inspect what the lister sent.
    async fn one_shot_server(status: &'static str, body: &'static str) -> (SocketAddr, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            let _ = tx.send(String::from_utf8_lossy(&head).to_string());
        });
        (addr, rx)
    }

    fn lister(addr: SocketAddr, filter: ObjectFilter) -> BlobStoreLister {
        BlobStoreLister::new(format!("http://{}/", addr), "secret-token", 100, Duration::from_secs(5), filter).unwrap()
    }

    #[tokio::test]
    async fn test_list_returns_first_page() {
        let body = r#"{"blobs":[
            {"pathname":"video-2024-01-01T10-00-00.mp4","url":"https://s/v.mp4","size":10},
            {"pathname":"report-2024-01-01T10-00-00.json","url":"https://s/r.json"}
        ],"hasMore":false}"#;
        let (addr, head) = one_shot_server("200 OK", body).await;

        let objects = assert_ok!(lister(addr, ObjectFilter::default()).list().await);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].pathname, "video-2024-01-01T10-00-00.mp4");
        assert_eq!(objects[0].size, Some(10));

        let head = head.await.unwrap().to_lowercase();
        assert!(head.starts_with("get /?limit=100 "));
        assert!(head.contains("authorization: bearer secret-token"));
    }

    #[tokio::test]
    async fn test_prefix_is_sent_and_enforced() {
        let body = r#"{"blobs":[
            {"pathname":"qa/video-2024-01-01T10-00-00.mp4","url":"https://s/v.mp4"},
            {"pathname":"prod/video-2024-01-01T10-00-00.mp4","url":"https://s/p.mp4"}
        ],"hasMore":true,"cursor":"abc"}"#;
        let (addr, head) = one_shot_server("200 OK", body).await;

        let objects = lister(addr, ObjectFilter::by_prefix("qa/")).list().await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].pathname, "qa/video-2024-01-01T10-00-00.mp4");
        assert!(head.await.unwrap().contains("prefix=qa%2F"));
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let (addr, _head) = one_shot_server("500 Internal Server Error", r#"{"error":"boom"}"#).await;
        let err = assert_err!(lister(addr, ObjectFilter::default()).list().await);
        assert!(matches!(err, StorageError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_unavailable() {
        let (addr, _head) = one_shot_server("200 OK", "not json").await;
        let err = lister(addr, ObjectFilter::default()).list().await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = lister(addr, ObjectFilter::default()).list().await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
    }

    #[test]
    fn test_rejects_empty_token_and_bad_limit() {
        let timeout = Duration::from_secs(1);
        let empty = BlobStoreLister::new("http://localhost/", "  ", 10, timeout, ObjectFilter::default());
        assert!(matches!(empty, Err(StorageError::InvalidConfig(_))));

        let too_many = BlobStoreLister::new("http://localhost/", "t", 1001, timeout, ObjectFilter::default());
        assert!(matches!(too_many, Err(StorageError::InvalidConfig(_))));

        let zero = BlobStoreLister::new("http://localhost/", "t", 0, timeout, ObjectFilter::default());
        assert!(matches!(zero, Err(StorageError::InvalidConfig(_))));
    }
}
