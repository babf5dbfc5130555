//! Session pairing core module.
//!
//! This module turns a flat object listing into the dashboard's session view:
//! every object is classified as a video or report artifact by name, a
//! timestamp-shaped session id is extracted from its name, and each video is
//! paired with the first report carrying the same id. Reports that belong to
//! no listed video are surfaced as orphans.
//!
//! Everything here is a pure function of its input; the same listing always
//! yields the same pairs.

use serde::{Deserialize, Serialize};

/// Submodule for name classification and session id extraction.
pub mod artifact;
/// Submodule for the pairing algorithm.
pub mod pairer;
/// Submodule for the `SessionPair` type.
pub mod session;
/// Submodule for aggregate counts over a pairing.
pub mod summary;

pub use artifact::{classify, extract_session_id};
pub use pairer::pair_sessions;
pub use session::SessionPair;
pub use summary::PairingSummary;

/// The role a stored object plays in a session.
///
/// Variants:
/// - `Video`: a screen recording (`.mp4`, `.webm`, `.ogg` with `video` in the name).
/// - `Report`: a JSON report (`.json` with `report` in the name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Video,
    Report,
}

/// Completeness of a session pair.
///
/// Variants:
/// - `Complete`: both the video and the report are present.
/// - `MissingReport`: the video has no matching report.
/// - `MissingVideo`: an orphaned report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStatus {
    Complete,
    MissingReport,
    MissingVideo,
}
