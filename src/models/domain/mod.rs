pub mod building;
pub mod report;
pub mod worklist;
pub use building::{BuildingRecord, Difficulty};
pub use report::{DownloadReport, FailedEntry, GenerationReport, ItemFailure};
pub use worklist::WorklistEntry;
