use std::path::PathBuf;
use std::sync::Arc;

use log::{error, info};
use warp::filters::BoxedFilter;
use warp::path::Tail;
use warp::reply::Response;
use warp::{http::StatusCode, reply, Filter, Rejection, Reply};

use super::assets::serve_asset;
use super::types::{ApiError, HealthResponse, SessionsResponse};
use crate::session_pairing::{pair_sessions, PairingSummary};
use crate::storage::storage_trait::ObjectLister;

/// GET /
pub fn dashboard_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path::end()
        .and(warp::get())
        .and_then(|| async move { serve_asset("index.html") })
}

/// GET /assets/:file
pub fn assets_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("assets")
        .and(warp::path::tail())
        .and(warp::get())
        .and_then(|tail: Tail| async move { serve_asset(tail.as_str()) })
}

/// GET /api/listBlob
pub fn list_blobs_route(
    lister: Arc<dyn ObjectLister>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "listBlob")
        .and(warp::get())
        .and_then(move || {
            let lister = lister.clone();
            async move {
                match lister.list().await {
                    Ok(objects) => Ok::<_, Rejection>(reply::with_status(reply::json(&objects), StatusCode::OK)),
                    Err(e) => {
                        error!("Error fetching blobs from {}: {}", lister.describe(), e);
                        Ok::<_, Rejection>(reply::with_status(
                            reply::json(&ApiError::new("Failed to fetch blobs")),
                            StatusCode::INTERNAL_SERVER_ERROR,
                        ))
                    }
                }
            }
        })
}

/// GET /api/sessions
pub fn list_sessions_route(
    lister: Arc<dyn ObjectLister>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path!("api" / "sessions")
        .and(warp::get())
        .and_then(move || {
            let lister = lister.clone();
            async move {
                match lister.list().await {
                    Ok(objects) => {
                        let pairs = pair_sessions(&objects);
                        let summary = PairingSummary::from_pairs(&pairs);
                        info!(
                            "Paired {} object(s) into {} session(s) ({} complete)",
                            objects.len(),
                            summary.sessions,
                            summary.complete
                        );
                        Ok::<_, Rejection>(reply::with_status(
                            reply::json(&SessionsResponse { pairs, summary }),
                            StatusCode::OK,
                        ))
                    }
                    Err(e) => {
                        error!("Unable to list sessions from {}: {}", lister.describe(), e);
                        Ok::<_, Rejection>(reply::with_status(
                            reply::json(&ApiError::new(e.to_string())),
                            StatusCode::SERVICE_UNAVAILABLE,
                        ))
                    }
                }
            }
        })
}

/// GET /health
pub fn health_route() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        reply::json(&HealthResponse {
            status: "ok".to_string(),
        })
    })
}

/// GET /files/:path, serving the directory backend's objects
pub fn files_route(root: PathBuf) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path("files").and(warp::get()).and(warp::fs::dir(root))
}

/// Composes every route. `files_root` is set when objects live in a local directory whose
/// listing URLs point back at this server.
pub fn routes(lister: Arc<dyn ObjectLister>, files_root: Option<PathBuf>) -> BoxedFilter<(Response,)> {
    let api = dashboard_route()
        .or(assets_route())
        .or(list_blobs_route(lister.clone()))
        .or(list_sessions_route(lister))
        .or(health_route())
        .map(|r| Reply::into_response(r))
        .boxed();

    match files_root {
        Some(root) => api
            .or(files_route(root).map(|r| Reply::into_response(r)))
            .unify()
            .boxed(),
        None => api,
    }
}
