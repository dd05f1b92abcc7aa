use crate::config::Config;
use crate::file_discovery::{FileDiscovery, FileInfo};
use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Names a malformed match can capture instead of an identifier.
pub const RESERVED_NAMES: [&str; 6] = [
    "default",
    "interface",
    "type",
    "const",
    "function",
    "class",
];

/// A symbol some file makes available for use elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub file_path: PathBuf,
    pub symbol_name: String,
}

impl ExportRecord {
    pub fn new(file_path: impl Into<PathBuf>, symbol_name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            symbol_name: symbol_name.into(),
        }
    }

    pub fn is_reserved(&self) -> bool {
        RESERVED_NAMES.contains(&self.symbol_name.as_str())
    }
}

struct ExportPatterns {
    declaration: Regex,
    default_export: Regex,
    export_list: Regex,
    identifier: Regex,
}

impl ExportPatterns {
    fn new() -> Result<Self> {
        Ok(Self {
            declaration: Regex::new(
                r"export\s+(?:const|function|class|type|interface|enum)\s+([A-Za-z0-9_]+)",
            )?,
            default_export: Regex::new(r"export\s+default\s+([A-Za-z0-9_]+)")?,
            export_list: Regex::new(r"export\s+\{([^}]*)\}")?,
            identifier: Regex::new(r"[A-Za-z0-9_]+")?,
        })
    }
}

pub struct ExportCollector {
    config: Config,
    patterns: ExportPatterns,
}

impl ExportCollector {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            config,
            patterns: ExportPatterns::new()?,
        })
    }

    /// Every (file, symbol) export under the target directory.
    ///
    /// Records follow traversal order, then pattern order within a file.
    pub fn collect_exports(&self) -> Vec<ExportRecord> {
        let files = FileDiscovery::new(self.config.clone()).discover_files();

        let mut exports = Vec::new();
        for file_info in &files {
            match self.collect_file(file_info) {
                Ok(mut records) => {
                    debug!("{}: {} exports", file_info.path.display(), records.len());
                    exports.append(&mut records);
                }
                Err(e) => {
                    warn!("could not read {}: {}", file_info.path.display(), e);
                }
            }
        }
        exports
    }

    fn collect_file(&self, file_info: &FileInfo) -> Result<Vec<ExportRecord>> {
        let bytes = std::fs::read(&file_info.path)?;
        let content = decode_lossy(&bytes);
        Ok(self.extract_exports(&file_info.path, &content))
    }

    /// Apply each export pattern to `content` in turn, keeping every capture.
    pub fn extract_exports(&self, path: &Path, content: &str) -> Vec<ExportRecord> {
        let mut records = Vec::new();

        for pattern in [&self.patterns.declaration, &self.patterns.default_export] {
            for captures in pattern.captures_iter(content) {
                if let Some(name) = captures.get(1) {
                    records.push(ExportRecord::new(path, name.as_str()));
                }
            }
        }

        // Coarse: every token inside the braces counts, `as` included.
        for captures in self.patterns.export_list.captures_iter(content) {
            let Some(body) = captures.get(1) else {
                continue;
            };
            for token in self.patterns.identifier.find_iter(body.as_str()) {
                records.push(ExportRecord::new(path, token.as_str()));
            }
        }

        records
    }
}

/// Decode UTF-8, dropping invalid byte sequences instead of replacing them.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut content = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        content.push_str(chunk.valid());
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(source: &str) -> Vec<String> {
        let collector = ExportCollector::new(Config::default()).unwrap();
        collector
            .extract_exports(Path::new("src/mod.ts"), source)
            .into_iter()
            .map(|r| r.symbol_name)
            .collect()
    }

    #[test]
    fn test_declaration_exports() {
        let source = r#"
export const Foo = 1;
export function bar() {}
export class Baz {}
export type Alias = string;
export interface Shape { x: number }
export enum Color { Red }
"#;
        assert_eq!(names(source), vec!["Foo", "bar", "Baz", "Alias", "Shape", "Color"]);
    }

    #[test]
    fn test_non_exported_declarations_are_ignored() {
        let source = "const hidden = 1;\nfunction helper() {}\nexport let notMatched = 2;";
        assert!(names(source).is_empty());
    }

    #[test]
    fn test_default_export_of_identifier() {
        assert_eq!(names("export default App;"), vec!["App"]);
    }

    #[test]
    fn test_default_function_is_captured_literally() {
        // reserved; dropped before the usage check
        let records = names("export default function Main() {}");
        assert_eq!(records, vec!["function"]);
    }

    #[test]
    fn test_export_list_captures_every_token() {
        assert_eq!(names("export { Bar };"), vec!["Bar"]);
        assert_eq!(names("export { Bar as Baz };"), vec!["Bar", "as", "Baz"]);
        assert_eq!(
            names("export {\n  one,\n  two,\n};"),
            vec!["one", "two"]
        );
    }

    #[test]
    fn test_pattern_order_within_file() {
        let source = "export { listed };\nexport default Thing;\nexport const first = 1;";
        assert_eq!(names(source), vec!["first", "Thing", "listed"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let source = "export const Foo = 1;\nexport { Foo };\nexport default Foo;";
        assert_eq!(names(source), vec!["Foo", "Foo", "Foo"]);
    }

    #[test]
    fn test_records_carry_path() {
        let collector = ExportCollector::new(Config::default()).unwrap();
        let records = collector.extract_exports(Path::new("src/a.ts"), "export const A = 1;");
        assert_eq!(records, vec![ExportRecord::new("src/a.ts", "A")]);
    }

    #[test]
    fn test_reserved_names() {
        assert!(ExportRecord::new("a.ts", "default").is_reserved());
        assert!(ExportRecord::new("a.ts", "class").is_reserved());
        assert!(!ExportRecord::new("a.ts", "Default").is_reserved());
        assert!(!ExportRecord::new("a.ts", "as").is_reserved());
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let bytes = b"export const A\xff\xfe = 1;";
        assert_eq!(decode_lossy(bytes), "export const A = 1;");
        assert_eq!(decode_lossy("caf\u{e9}".as_bytes()), "caf\u{e9}");
        assert_eq!(decode_lossy(b""), "");
    }
}
