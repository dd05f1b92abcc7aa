use crate::config::Config;
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
}

pub struct FileDiscovery {
    config: Config,
}

impl FileDiscovery {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Every eligible source file under the target directory, in traversal order.
    ///
    /// Unreadable entries (including a missing root) are logged and skipped.
    pub fn discover_files(&self) -> Vec<FileInfo> {
        let mut files = Vec::new();

        for result in WalkDir::new(&self.config.target_directory).follow_links(false) {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.config.is_source_file(path) {
                continue;
            }

            files.push(FileInfo {
                path: path.to_path_buf(),
            });
        }

        debug!(
            "discovered {} source files under {}",
            files.len(),
            self.config.target_directory.display()
        );
        files
    }
}
