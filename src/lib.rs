pub mod config;
pub mod file_discovery;
pub mod export_collector;
pub mod usage_checker;
pub mod analyzer;
pub mod reporter;

pub use config::Config;
pub use file_discovery::FileDiscovery;
pub use export_collector::{ExportCollector, ExportRecord};
pub use usage_checker::{GrepSearch, NativeSearch, UsageChecker, UsageSearch};
pub use analyzer::{Analyzer, SweepReport};
pub use reporter::Reporter;

pub type Result<T> = anyhow::Result<T>;
