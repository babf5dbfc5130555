use std::sync::LazyLock;

use regex::Regex;

use super::ArtifactKind;

/// `YYYY-MM-DDTHH-MM-SS`, colons replaced by hyphens so the token is filename safe.
const SESSION_ID_PATTERN: &str = r"\d{4}-\d{2}-\d{2}T\d{2}-\d{2}-\d{2}";

const VIDEO_EXTENSIONS: [&str; 3] = [".mp4", ".webm", ".ogg"];
const REPORT_EXTENSION: &str = ".json";

static SESSION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SESSION_ID_PATTERN).expect("session id pattern is valid"));

/// Returns the first timestamp-shaped token in `name`, if any.
///
/// ```
/// use bugdash::session_pairing::extract_session_id;
///
/// assert_eq!(
///     extract_session_id("video-2024-01-01T10-00-00.mp4").as_deref(),
///     Some("2024-01-01T10-00-00")
/// );
/// assert_eq!(extract_session_id("video-latest.mp4"), None);
/// ```
pub fn extract_session_id(name: &str) -> Option<String> {
    SESSION_ID_RE.find(name).map(|m| m.as_str().to_string())
}

/// Classifies an object by its name. Names matching neither rule do not take part in pairing.
pub fn classify(name: &str) -> Option<ArtifactKind> {
    if name.contains("video") && VIDEO_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
        Some(ArtifactKind::Video)
    } else if name.contains("report") && name.ends_with(REPORT_EXTENSION) {
        Some(ArtifactKind::Report)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_videos() {
        assert_eq!(classify("video-2024-01-01T10-00-00.mp4"), Some(ArtifactKind::Video));
        assert_eq!(classify("runs/screen-video.webm"), Some(ArtifactKind::Video));
        assert_eq!(classify("video.ogg"), Some(ArtifactKind::Video));
        // extension without the keyword, keyword without the extension
        assert_eq!(classify("capture-2024-01-01T10-00-00.mp4"), None);
        assert_eq!(classify("video-2024-01-01T10-00-00.mkv"), None);
        assert_eq!(classify("video-2024-01-01T10-00-00.mp4.part"), None);
    }

    #[test]
    fn test_classify_reports() {
        assert_eq!(classify("report-2024-01-01T10-00-00.json"), Some(ArtifactKind::Report));
        assert_eq!(classify("bug/report.json"), Some(ArtifactKind::Report));
        assert_eq!(classify("summary-2024-01-01T10-00-00.json"), None);
        assert_eq!(classify("report-2024-01-01T10-00-00.txt"), None);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(classify("VIDEO-2024-01-01T10-00-00.mp4"), None);
        assert_eq!(classify("video-2024-01-01T10-00-00.MP4"), None);
        assert_eq!(classify("Report-2024-01-01T10-00-00.json"), None);
    }

    #[test]
    fn test_classify_unrelated() {
        assert_eq!(classify("notes.txt"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_extract_first_token() {
        assert_eq!(
            extract_session_id("uploads/report-2024-03-05T23-59-01-v2.json").as_deref(),
            Some("2024-03-05T23-59-01")
        );
        assert_eq!(
            extract_session_id("video-2024-01-01T10-00-00-2024-02-02T11-11-11.mp4").as_deref(),
            Some("2024-01-01T10-00-00")
        );
    }

    #[test]
    fn test_extract_rejects_other_shapes() {
        // colon separated ISO timestamps are not session ids
        assert_eq!(extract_session_id("video-2024-01-01T10:00:00.mp4"), None);
        assert_eq!(extract_session_id("video-2024-1-01T10-00-00.mp4"), None);
        assert_eq!(extract_session_id("video-20240101T100000.mp4"), None);
        assert_eq!(extract_session_id(""), None);
    }
}
