use crate::config::{Config, SearchBackend, SearchErrorPolicy};
use crate::export_collector::ExportRecord;
use regex::bytes::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no matches")]
    NoMatches,
    #[error("failed to run search tool: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("search failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
}

/// A recursive whole-word search over a directory tree.
pub trait UsageSearch {
    /// Files under `root` containing `word` as a whole word.
    ///
    /// Zero matches is reported as `SearchError::NoMatches`, never as an empty list.
    fn files_containing(&self, word: &str, root: &Path) -> Result<Vec<PathBuf>, SearchError>;
}

/// Shells out to `grep -r -l -w`.
pub struct GrepSearch {
    program: String,
}

impl GrepSearch {
    pub fn new() -> Self {
        Self {
            program: "grep".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GrepSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageSearch for GrepSearch {
    fn files_containing(&self, word: &str, root: &Path) -> Result<Vec<PathBuf>, SearchError> {
        let output = Command::new(&self.program)
            .args(["-r", "-l", "-w", "-F", "-e"])
            .arg(word)
            .arg("--")
            .arg(root)
            .output()?;

        match output.status.code() {
            Some(0) => Ok(String::from_utf8_lossy(&output.stdout)
                .lines()
                .filter(|line| !line.is_empty())
                .map(PathBuf::from)
                .collect()),
            // grep: exit 1 means no lines were selected
            Some(1) => Err(SearchError::NoMatches),
            _ => Err(SearchError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

/// In-process search over raw file bytes; no external tool needed.
///
/// Mirrors grep's exit semantics: any unreadable entry fails the whole search.
pub struct NativeSearch;

impl UsageSearch for NativeSearch {
    fn files_containing(&self, word: &str, root: &Path) -> Result<Vec<PathBuf>, SearchError> {
        let pattern = Regex::new(&format!(r"(?-u:\b){}(?-u:\b)", regex::escape(word))).map_err(
            |e| SearchError::Failed {
                status: "invalid pattern".to_string(),
                stderr: e.to_string(),
            },
        )?;

        let mut matches = Vec::new();
        let mut errors = Vec::new();

        for result in WalkDir::new(root) {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    errors.push(e.to_string());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match std::fs::read(entry.path()) {
                Ok(bytes) if pattern.is_match(&bytes) => matches.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => errors.push(format!("{}: {}", entry.path().display(), e)),
            }
        }

        if !errors.is_empty() {
            return Err(SearchError::Failed {
                status: format!("{} unreadable entries", errors.len()),
                stderr: errors.join("; "),
            });
        }
        if matches.is_empty() {
            return Err(SearchError::NoMatches);
        }
        Ok(matches)
    }
}

pub struct UsageChecker {
    config: Config,
    search: Box<dyn UsageSearch>,
}

impl UsageChecker {
    pub fn new(config: Config) -> Self {
        let search: Box<dyn UsageSearch> = match config.search_backend {
            SearchBackend::Grep => Box::new(GrepSearch::new()),
            SearchBackend::Native => Box::new(NativeSearch),
        };
        Self { config, search }
    }

    pub fn with_search(config: Config, search: Box<dyn UsageSearch>) -> Self {
        Self { config, search }
    }

    /// True iff some file other than the defining one, and not a test, mentions the symbol.
    pub fn is_used(&self, record: &ExportRecord) -> bool {
        let root = &self.config.target_directory;
        debug!("searching {} for {}", root.display(), record.symbol_name);

        let files = match self.search.files_containing(&record.symbol_name, root) {
            Ok(files) => files,
            Err(SearchError::NoMatches) => return false,
            Err(e) => {
                warn!("search for {} failed: {}", record.symbol_name, e);
                return self.config.on_search_error == SearchErrorPolicy::AssumeUsed;
            }
        };

        let defining_file = absolute(&record.file_path);
        files
            .iter()
            .filter(|path| absolute(path) != defining_file)
            .any(|path| !self.config.is_test_file(path))
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
