use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{unspanned, AnbnError, ErrorKind, ErrorReporting, PhaseContext};
use crate::tree::render::EPSILON;

/// A candidate string read from disk, with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub text: String,
    pub file: PathBuf,
    /// 1-based.
    pub line: usize,
}

/// Finds and reads candidate files.
///
/// A file holds one candidate per line. Blank lines and lines starting with `#` are
/// skipped, a line holding only `ε` is the empty string, and a trailing `\r` is dropped.
#[derive(Debug)]
pub struct InputDiscoverer;

impl InputDiscoverer {
    // =====================
    // Public API - File Discovery
    // =====================

    /// A file is returned as-is; a directory is walked for `.txt` files.
    ///
    /// The returned list of files is sorted to ensure deterministic order.
    pub fn discover_input_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, AnbnError> {
        let root = root.as_ref();
        if root.is_file() {
            return Ok(vec![root.to_path_buf()]);
        }
        if !root.is_dir() {
            return Err(path_error(root, "no such file or directory"));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|e| path_error(root, &e.to_string()))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !Self::is_input_file(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }
        files.sort();
        Ok(files)
    }

    pub fn read_inputs<P: AsRef<Path>>(root: P) -> Result<Vec<InputLine>, AnbnError> {
        let mut inputs = Vec::new();
        for file in Self::discover_input_files(root)? {
            let content =
                std::fs::read_to_string(&file).map_err(|e| path_error(&file, &e.to_string()))?;
            inputs.extend(Self::parse_inputs(&content).map(|(line, text)| InputLine {
                text,
                file: file.clone(),
                line,
            }));
        }
        Ok(inputs)
    }

    /// Candidates in `content` with their 1-based line numbers.
    pub fn parse_inputs(content: &str) -> impl Iterator<Item = (usize, String)> + '_ {
        content.split('\n').enumerate().filter_map(|(i, raw)| {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if line.trim().is_empty() || line.starts_with('#') {
                return None;
            }
            let text = if line == EPSILON { "" } else { line };
            Some((i + 1, text.to_string()))
        })
    }

    fn is_input_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "txt")
    }
}

fn path_error(path: &Path, reason: &str) -> AnbnError {
    PhaseContext::detached("discovery").report(
        ErrorKind::InvalidPath {
            path: path.display().to_string(),
            reason: reason.to_string(),
        },
        unspanned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("anbn-discovery-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_inputs_rules() {
        let parsed: Vec<_> = InputDiscoverer::parse_inputs("# header\nab\r\n\nε\n  \nba").collect();
        assert_eq!(
            parsed,
            vec![(2, "ab".to_string()), (4, String::new()), (6, "ba".to_string())]
        );
    }

    #[test]
    fn test_directory_walk_is_sorted_and_filtered() {
        let dir = scratch_dir("walk");
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("b.txt"), "aabb\n").unwrap();
        std::fs::write(dir.join("a.txt"), "ab\n").unwrap();
        std::fs::write(dir.join("nested").join("c.txt"), "ba\n").unwrap();
        std::fs::write(dir.join("ignored.md"), "abab\n").unwrap();

        let texts: Vec<_> = InputDiscoverer::read_inputs(&dir)
            .unwrap()
            .into_iter()
            .map(|input| input.text)
            .collect();
        assert_eq!(texts, vec!["ab", "aabb", "ba"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let err = InputDiscoverer::read_inputs("/definitely/not/here").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidPath { .. }));
    }
}
