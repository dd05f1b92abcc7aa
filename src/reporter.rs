use crate::{
    analyzer::{SweepObserver, SweepReport},
    export_collector::ExportRecord,
};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub exports_found: usize,
    pub skipped_reserved: usize,
    pub unused: Vec<ExportRecord>,
}

#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub version: String,
    pub root: String,
}

pub struct Reporter {
    format: OutputFormat,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn generate_report(&self, sweep: &SweepReport) -> Report {
        Report {
            metadata: ReportMetadata {
                generated_at: chrono::Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                root: sweep.root.display().to_string(),
            },
            exports_found: sweep.exports_found,
            skipped_reserved: sweep.skipped_reserved,
            unused: sweep.unused.clone(),
        }
    }

    /// Print whatever comes after the progress lines.
    pub fn finish(&self, sweep: &SweepReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => print!("{}", render_summary(sweep)),
            OutputFormat::Json => println!("{}", self.export_to_json(sweep)?),
        }
        Ok(())
    }

    pub fn export_to_json(&self, sweep: &SweepReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.generate_report(sweep))?)
    }
}

impl SweepObserver for Reporter {
    fn on_scan_started(&mut self, root: &Path) {
        if self.format == OutputFormat::Text {
            println!("{}", scanning_line(root));
        }
    }

    fn on_exports_collected(&mut self, count: usize) {
        if self.format == OutputFormat::Text {
            println!("{}", found_line(count));
        }
    }

    fn on_unused(&mut self, record: &ExportRecord) {
        if self.format == OutputFormat::Text {
            println!("{}", unused_line(record));
        }
    }
}

pub fn scanning_line(root: &Path) -> String {
    format!("Scanning {} for exports...", root.display())
}

pub fn found_line(count: usize) -> String {
    format!("Found {} exports. Checking usage...", count)
}

pub fn unused_line(record: &ExportRecord) -> String {
    format!(
        "Potentially unused: {} in {}",
        record.symbol_name,
        record.file_path.display()
    )
}

/// The closing block: a blank line, the header, then one line per finding.
pub fn render_summary(sweep: &SweepReport) -> String {
    let mut out = String::from("\n--- Summary ---\n");
    if sweep.unused.is_empty() {
        out.push_str("No unused exports found.\n");
    }
    for record in &sweep.unused {
        out.push_str(&format!(
            "{}: {}\n",
            record.file_path.display(),
            record.symbol_name
        ));
    }
    out
}
