use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use super::PairStatus;
use crate::storage::types::StorageObject;

/// A session's video and report, either of which may be missing.
///
/// At least one side is always present: pairs are only built from an
/// artifact. `session_id` is the extracted timestamp for video-derived pairs
/// (absent when the video name carries none) and the report's pathname for
/// orphaned reports.
///
/// Serialized as `{"sessionId", "video", "report", "status"}`; `status` is
/// derived from the two sides and ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPair {
    pub session_id: Option<String>,
    pub video: Option<StorageObject>,
    pub report: Option<StorageObject>,
}

impl SessionPair {
    pub(crate) fn from_video(session_id: Option<String>, video: StorageObject, report: Option<StorageObject>) -> Self {
        Self {
            session_id,
            video: Some(video),
            report,
        }
    }

    pub(crate) fn orphan_report(report: StorageObject) -> Self {
        Self {
            session_id: Some(report.pathname.clone()),
            video: None,
            report: Some(report),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.video.is_some() && self.report.is_some()
    }

    pub fn status(&self) -> PairStatus {
        match (&self.video, &self.report) {
            (Some(_), Some(_)) => PairStatus::Complete,
            (Some(_), None) => PairStatus::MissingReport,
            (None, _) => PairStatus::MissingVideo,
        }
    }

    /// Label shown for the session, falling back to the video name when no id was found.
    pub fn label(&self) -> &str {
        self.session_id
            .as_deref()
            .or_else(|| self.video.as_ref().map(|v| v.name()))
            .unwrap_or("")
    }
}

impl Serialize for SessionPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SessionPair", 4)?;
        state.serialize_field("sessionId", &self.session_id)?;
        state.serialize_field("video", &self.video)?;
        state.serialize_field("report", &self.report)?;
        state.serialize_field("status", &self.status())?;
        state.end()
    }
}
