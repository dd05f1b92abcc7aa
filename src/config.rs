use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub target_directory: PathBuf,
    pub file_extensions: Vec<String>,
    pub search_backend: SearchBackend,
    pub on_search_error: SearchErrorPolicy,
}

/// Which whole-word search implementation answers usage queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBackend {
    /// Spawn `grep -r -l -w` once per symbol.
    Grep,
    /// Walk the tree in-process with `regex::bytes`.
    Native,
}

/// How a search that failed for a reason other than "no matches" is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorPolicy {
    AssumeUnused,
    AssumeUsed,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_directory: PathBuf::from("src"),
            file_extensions: vec!["ts".to_string(), "tsx".to_string()],
            search_backend: SearchBackend::Grep,
            on_search_error: SearchErrorPolicy::AssumeUnused,
        }
    }
}

impl Config {
    pub fn with_target(target_directory: impl Into<PathBuf>) -> Self {
        Self {
            target_directory: target_directory.into(),
            ..Self::default()
        }
    }

    /// File-name suffixes that mark a test file, e.g. `.test.ts`.
    pub fn test_suffixes(&self) -> Vec<String> {
        self.file_extensions
            .iter()
            .map(|ext| format!(".test.{}", ext))
            .collect()
    }

    pub fn is_test_file(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name() else {
            return false;
        };
        let filename = filename.to_string_lossy();
        self.test_suffixes()
            .iter()
            .any(|suffix| filename.ends_with(suffix.as_str()))
    }

    /// A file the collector scans: a configured extension and not a test file.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(filename) = path.file_name() else {
            return false;
        };
        let filename = filename.to_string_lossy();
        let has_extension = self
            .file_extensions
            .iter()
            .any(|ext| filename.ends_with(&format!(".{}", ext)));

        has_extension && !self.is_test_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_src() {
        let config = Config::default();
        assert_eq!(config.target_directory, PathBuf::from("src"));
        assert_eq!(config.file_extensions, vec!["ts", "tsx"]);
        assert_eq!(config.search_backend, SearchBackend::Grep);
        assert_eq!(config.on_search_error, SearchErrorPolicy::AssumeUnused);
    }

    #[test]
    fn test_suffixes_follow_extensions() {
        let config = Config::default();
        assert_eq!(config.test_suffixes(), vec![".test.ts", ".test.tsx"]);
    }

    #[test]
    fn test_source_file_eligibility() {
        let config = Config::default();
        assert!(config.is_source_file(Path::new("src/a.ts")));
        assert!(config.is_source_file(Path::new("src/ui/Button.tsx")));
        assert!(!config.is_source_file(Path::new("src/a.test.ts")));
        assert!(!config.is_source_file(Path::new("src/Button.test.tsx")));
        assert!(!config.is_source_file(Path::new("src/a.js")));
        assert!(!config.is_source_file(Path::new("src/a.d.json")));
    }

    #[test]
    fn test_test_file_detection_uses_file_name_only() {
        let config = Config::default();
        assert!(config.is_test_file(Path::new("src/foo.test.ts")));
        assert!(!config.is_test_file(Path::new("src/foo.test.ts/index.ts")));
        assert!(!config.is_test_file(Path::new("src/test.ts")));
    }

    #[test]
    fn test_custom_extensions() {
        let mut config = Config::with_target("lib");
        config.file_extensions = vec!["js".to_string()];
        assert!(config.is_source_file(Path::new("lib/a.js")));
        assert!(!config.is_source_file(Path::new("lib/a.ts")));
        assert!(config.is_test_file(Path::new("lib/a.test.js")));
    }
}
