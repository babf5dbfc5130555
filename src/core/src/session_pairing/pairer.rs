//! The pairing algorithm.
//!
//! 1. Every video becomes a pair. When its name carries a session id, the
//!    first report whose name *contains* that id is attached.
//! 2. Every report that was not attached in step 1 and whose own extracted id
//!    equals no video pair's id becomes an orphan pair keyed by the report's
//!    pathname. A report attached through a later timestamp in its name (its
//!    extracted id being an earlier, unrelated one) is therefore listed once,
//!    with its video, and not again as an orphan.
//! 3. Video pairs come first, in input order, followed by orphans in input order.
//!
//! When several reports contain the same id, the first one in input order is
//! attached and the others are not surfaced at all. Reports without an id
//! never match, so they are always orphans.

use log::debug;

use super::artifact::{classify, extract_session_id};
use super::session::SessionPair;
use super::ArtifactKind;
use crate::storage::types::StorageObject;

struct Artifact<'a> {
    object: &'a StorageObject,
    session_id: Option<String>,
}

impl<'a> Artifact<'a> {
    fn new(object: &'a StorageObject) -> Self {
        Self {
            session_id: extract_session_id(object.name()),
            object,
        }
    }
}

/// Groups a listing into session pairs. Objects that are neither videos nor reports are ignored.
pub fn pair_sessions(objects: &[StorageObject]) -> Vec<SessionPair> {
    let mut videos = Vec::new();
    let mut reports = Vec::new();
    for object in objects {
        match classify(object.name()) {
            Some(ArtifactKind::Video) => videos.push(Artifact::new(object)),
            Some(ArtifactKind::Report) => reports.push(Artifact::new(object)),
            None => debug!("Ignoring unclassified object {}", object.name()),
        }
    }

    let mut attached = vec![false; reports.len()];
    let mut pairs: Vec<SessionPair> = videos
        .iter()
        .map(|video| {
            let report = video.session_id.as_deref().and_then(|id| {
                let mut matching = reports
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.object.name().contains(id));
                let first = matching.next();
                for (_, shadowed) in matching {
                    debug!(
                        "Report {} shadowed by an earlier report for session {}",
                        shadowed.object.name(),
                        id
                    );
                }
                first.map(|(idx, r)| {
                    attached[idx] = true;
                    r.object.clone()
                })
            });
            SessionPair::from_video(video.session_id.clone(), video.object.clone(), report)
        })
        .collect();

    let orphans: Vec<SessionPair> = reports
        .iter()
        .zip(attached.iter())
        .filter(|(report, was_attached)| {
            !**was_attached
                && match report.session_id {
                    Some(ref id) => !pairs.iter().any(|p| p.session_id.as_deref() == Some(id.as_str())),
                    None => true,
                }
        })
        .map(|(report, _)| SessionPair::orphan_report(report.object.clone()))
        .collect();

    debug!(
        "Paired {} video(s) and {} report(s) into {} session(s), {} orphan report(s)",
        videos.len(),
        reports.len(),
        pairs.len() + orphans.len(),
        orphans.len()
    );

    pairs.extend(orphans);
    pairs
}
