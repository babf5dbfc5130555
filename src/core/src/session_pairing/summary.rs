use serde::{Deserialize, Serialize};

use super::session::SessionPair;
use super::PairStatus;

/// Counts of complete and incomplete sessions in a pairing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingSummary {
    pub sessions: usize,
    pub complete: usize,
    pub missing_report: usize,
    pub orphan_reports: usize,
}

impl PairingSummary {
    pub fn from_pairs(pairs: &[SessionPair]) -> Self {
        pairs.iter().fold(Self::default(), |mut acc, pair| {
            acc.sessions += 1;
            match pair.status() {
                PairStatus::Complete => acc.complete += 1,
                PairStatus::MissingReport => acc.missing_report += 1,
                PairStatus::MissingVideo => acc.orphan_reports += 1,
            }
            acc
        })
    }
}
