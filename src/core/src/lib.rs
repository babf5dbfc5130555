pub mod configuration;
pub mod controller;
pub mod error_handling;
pub mod session_pairing;
pub mod storage;
pub mod web_interface;

pub use session_pairing::{pair_sessions, PairStatus, SessionPair};
pub use storage::StorageObject;
