//! Static dashboard files compiled into the binary.

use rust_embed::RustEmbed;
use warp::{reject, reply, Rejection};

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/"]
struct DashboardAssets;

/// Looks up an embedded file and replies with it, guessing the content type from its extension.
pub fn serve_asset(path: &str) -> Result<reply::WithHeader<Vec<u8>>, Rejection> {
    let asset = DashboardAssets::get(path).ok_or_else(reject::not_found)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok(reply::with_header(asset.data.into_owned(), "Content-Type", mime.to_string()))
}
