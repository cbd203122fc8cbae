pub mod engine;
pub mod report;

pub use engine::{scan_and_purge, FsRemover, PurgeEngine, Remover};
pub use report::{FileRecord, Outcome, ScanResult};
