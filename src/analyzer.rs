use crate::{
    config::Config,
    export_collector::{ExportCollector, ExportRecord},
    usage_checker::UsageChecker,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receives progress while a sweep runs. Every hook defaults to doing nothing.
pub trait SweepObserver {
    fn on_scan_started(&mut self, _root: &Path) {}
    fn on_exports_collected(&mut self, _count: usize) {}
    fn on_unused(&mut self, _record: &ExportRecord) {}
}

/// Observer for callers that only want the final report.
pub struct Silent;

impl SweepObserver for Silent {}

#[derive(Debug, Clone)]
pub struct SweepReport {
    pub root: PathBuf,
    pub exports_found: usize,
    pub skipped_reserved: usize,
    pub unused: Vec<ExportRecord>,
}

pub struct Analyzer {
    config: Config,
    collector: ExportCollector,
    checker: UsageChecker,
}

impl Analyzer {
    pub fn new(config: Config) -> Result<Self> {
        let checker = UsageChecker::new(config.clone());
        Self::with_checker(config, checker)
    }

    pub fn with_checker(config: Config, checker: UsageChecker) -> Result<Self> {
        let collector = ExportCollector::new(config.clone())?;
        Ok(Self {
            config,
            collector,
            checker,
        })
    }

    /// Collect every export, then check each one in order.
    ///
    /// Unused exports reach the observer as soon as they are found.
    pub fn find_unused(&self, observer: &mut dyn SweepObserver) -> SweepReport {
        let root = self.config.target_directory.clone();
        observer.on_scan_started(&root);

        let exports = self.collector.collect_exports();
        observer.on_exports_collected(exports.len());

        let mut unused = Vec::new();
        let mut skipped_reserved = 0;
        for record in &exports {
            if record.is_reserved() {
                debug!(
                    "skipping reserved name {} in {}",
                    record.symbol_name,
                    record.file_path.display()
                );
                skipped_reserved += 1;
                continue;
            }
            if !self.checker.is_used(record) {
                observer.on_unused(record);
                unused.push(record.clone());
            }
        }

        SweepReport {
            root,
            exports_found: exports.len(),
            skipped_reserved,
            unused,
        }
    }
}
