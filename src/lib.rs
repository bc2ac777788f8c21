// vmstats: point-in-time runtime resource snapshots

pub mod collector;
pub mod config;
pub mod error;
pub mod introspector;
pub mod models;
pub mod names;
pub mod normalize;
pub mod report;
pub mod sysinfo_repo;
pub mod version;

pub use collector::{Diagnostic, DiagnosticHook, SnapshotCollector};
pub use error::IntrospectError;
pub use introspector::RuntimeIntrospector;
pub use models::Snapshot;
