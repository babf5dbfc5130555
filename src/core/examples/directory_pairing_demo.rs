use bugdash::session_pairing::{pair_sessions, PairingSummary};
use bugdash::storage::{DirectoryLister, ObjectFilter, ObjectLister};
use env_logger::Env;
use log::info;
use std::env;
use std::fs;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    // Initialize logger (RUST_LOG can override; default to info)
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();

    // Choose a directory for the sample objects
    let out_dir: PathBuf = env::var("PAIRING_DEMO_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::current_dir().expect("cwd").join("target").join("pairing_demo"));
    fs::create_dir_all(&out_dir).expect("create output dir");

    // One complete session, one video without report, one orphaned report and an unrelated file
    for name in [
        "video-2024-01-01T10-00-00.mp4",
        "report-2024-01-01T10-00-00.json",
        "video-2024-01-02T09-30-00.webm",
        "report-2024-01-03T18-45-12.json",
        "notes.txt",
    ] {
        fs::write(out_dir.join(name), b"demo").expect("write sample object");
    }

    let lister = DirectoryLister::new(&out_dir, "/files", ObjectFilter::default()).expect("create lister");
    let objects = lister.list().await.expect("list objects");
    info!("Listed {} object(s) from {}", objects.len(), out_dir.display());

    let pairs = pair_sessions(&objects);
    for pair in &pairs {
        info!(
            "{:<34} video={:<34} report={}",
            pair.label(),
            pair.video.as_ref().map_or("-", |v| v.name()),
            pair.report.as_ref().map_or("-", |r| r.name())
        );
    }
    info!("{:?}", PairingSummary::from_pairs(&pairs));
}
