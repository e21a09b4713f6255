use std::fs;
use std::path::Path;

use super::parser::{parse_line, LineError};
use crate::error::{PkgError, Result};

/// Location of the repositories file when none is configured.
pub const DEFAULT_REPOSITORIES_PATH: &str = "/etc/pkg/repositories";

/// A named remote source of package artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub name: String,
    /// Base URL, used as a prefix when building download URLs
    pub url: String,
}

impl RemoteRepository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A line of the repositories file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based physical line number
    pub line: usize,
    pub error: LineError,
}

/// Outcome of loading a repositories source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of repositories appended to the registry
    pub added: usize,
    /// Lines rejected as malformed, in file order
    pub rejected: Vec<RejectedLine>,
}

/// Ordered collection of configured repositories.
///
/// Entries keep insertion order and are never reordered or deduplicated;
/// the same name may appear more than once.
#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    repositories: Vec<RemoteRepository>,
}

impl RepositoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load repositories from the default system location.
    pub fn load_default(&mut self) -> Result<LoadReport> {
        self.load(DEFAULT_REPOSITORIES_PATH)
    }

    /// Load repositories from a `name=url` file, appending to the registry.
    ///
    /// Fails only if the file cannot be read. Malformed lines are logged,
    /// recorded in the returned report and skipped.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let path = path.as_ref();
        log::debug!("Reading repositories from {}", path.display());

        let bytes = fs::read(path).map_err(|e| {
            log::error!("fopen({}): {}", path.display(), e);
            PkgError::ConfigUnreadable {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        Ok(self.load_str(&String::from_utf8_lossy(&bytes)))
    }

    /// Parse repositories from already-read text.
    pub fn load_str(&mut self, contents: &str) -> LoadReport {
        let mut report = LoadReport::default();

        for (index, line) in contents.lines().enumerate() {
            let line_no = index + 1;

            match parse_line(line) {
                Ok(Some((name, url))) => {
                    self.add(name, url);
                    report.added += 1;
                }
                Ok(None) => {}
                Err(error) => {
                    match error {
                        LineError::TooManyFields => log::warn!(
                            "Wrong repository format at line {} (ignoring repository)",
                            line_no
                        ),
                        LineError::MissingName | LineError::MissingUrl => log::warn!(
                            "Repository name or URL is missing at line {} (ignoring repository)",
                            line_no
                        ),
                    }
                    report.rejected.push(RejectedLine { line: line_no, error });
                }
            }
        }

        log::debug!(
            "Loaded {} repositories ({} lines rejected)",
            report.added,
            report.rejected.len()
        );

        report
    }

    /// Append a repository at the tail.
    pub fn add(&mut self, name: &str, url: &str) {
        self.repositories.push(RemoteRepository::new(name, url));
    }

    /// Remove every repository.
    pub fn clear(&mut self) {
        self.repositories.clear();
    }

    /// Begin a new traversal positioned before the first entry.
    pub fn cursor(&self) -> RepositoryCursor<'_> {
        RepositoryCursor::new(&self.repositories)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RemoteRepository> {
        self.repositories.iter()
    }

    pub fn repositories(&self) -> &[RemoteRepository] {
        &self.repositories
    }

    /// First repository registered under `name`.
    pub fn find(&self, name: &str) -> Option<&RemoteRepository> {
        self.repositories.iter().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }
}

impl<'a> IntoIterator for &'a RepositoryRegistry {
    type Item = &'a RemoteRepository;
    type IntoIter = std::slice::Iter<'a, RemoteRepository>;

    fn into_iter(self) -> Self::IntoIter {
        self.repositories.iter()
    }
}

/// Caller-owned traversal over a registry.
///
/// Several cursors can walk the same registry independently. Once the end
/// is reached every further `next` returns `None` until `reset`.
#[derive(Debug, Clone)]
pub struct RepositoryCursor<'a> {
    repositories: &'a [RemoteRepository],
    /// Index of the last returned entry, `None` before the first call
    position: Option<usize>,
}

impl<'a> RepositoryCursor<'a> {
    fn new(repositories: &'a [RemoteRepository]) -> Self {
        Self {
            repositories,
            position: None,
        }
    }

    /// Rewind to before the first entry.
    pub fn reset(&mut self) {
        self.position = None;
    }
}

impl<'a> Iterator for RepositoryCursor<'a> {
    type Item = &'a RemoteRepository;

    fn next(&mut self) -> Option<Self::Item> {
        let next = match self.position {
            None => 0,
            Some(i) => (i + 1).min(self.repositories.len()),
        };
        self.position = Some(next);
        self.repositories.get(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "main=https://example.com/repo\n# comment\nbroken-line\nsecond=https://example.org/repo2\n";

    #[test]
    fn test_load_str_sample() {
        let mut registry = RepositoryRegistry::new();
        let report = registry.load_str(SAMPLE);

        assert_eq!(report.added, 2);
        assert_eq!(
            report.rejected,
            vec![RejectedLine { line: 3, error: LineError::MissingUrl }]
        );
        assert_eq!(
            registry.repositories(),
            &[
                RemoteRepository::new("main", "https://example.com/repo"),
                RemoteRepository::new("second", "https://example.org/repo2"),
            ]
        );
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let mut registry = RepositoryRegistry::new();
        let report = registry.load(file.path()).unwrap();

        assert_eq!(report.added, 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = RepositoryRegistry::new();

        let err = registry.load(dir.path().join("repositories")).unwrap_err();
        assert!(matches!(err, PkgError::ConfigUnreadable { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_appends_to_existing_entries() {
        let mut registry = RepositoryRegistry::new();
        registry.add("local", "file:///srv/pkg");
        registry.load_str("main=https://example.com\n");

        let names: Vec<_> = registry.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["local", "main"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut registry = RepositoryRegistry::new();
        registry.load_str("main=https://a.example\nmain=https://b.example\n");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("main").unwrap().url, "https://a.example");
    }

    #[test]
    fn test_rejected_lines_use_physical_line_numbers() {
        let mut registry = RepositoryRegistry::new();
        let report = registry.load_str("\n# c\n; c\na=b=c\nok=https://x\n=https://y\n");

        assert_eq!(
            report.rejected,
            vec![
                RejectedLine { line: 4, error: LineError::TooManyFields },
                RejectedLine { line: 6, error: LineError::MissingName },
            ]
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_whitespace_only_lines_are_not_reported() {
        let mut registry = RepositoryRegistry::new();
        let report = registry.load_str("   \n\t\nmain=https://example.com\n \r\n");

        assert_eq!(report.added, 1);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_cursor_traversal_and_reset() {
        let mut registry = RepositoryRegistry::new();
        registry.add("a", "https://a");
        registry.add("b", "https://b");

        let mut cursor = registry.cursor();
        assert_eq!(cursor.next().map(|r| r.name.as_str()), Some("a"));
        assert_eq!(cursor.next().map(|r| r.name.as_str()), Some("b"));
        assert!(cursor.next().is_none());
        assert!(cursor.next().is_none());

        cursor.reset();
        assert_eq!(cursor.next().map(|r| r.name.as_str()), Some("a"));
    }

    #[test]
    fn test_cursor_on_empty_registry() {
        let registry = RepositoryRegistry::new();
        let mut cursor = registry.cursor();
        assert!(cursor.next().is_none());
        cursor.reset();
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_independent_cursors() {
        let mut registry = RepositoryRegistry::new();
        registry.add("a", "https://a");
        registry.add("b", "https://b");

        let mut first = registry.cursor();
        let mut second = registry.cursor();

        assert_eq!(first.next().unwrap().name, "a");
        assert_eq!(first.next().unwrap().name, "b");
        assert_eq!(second.next().unwrap().name, "a");
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut registry = RepositoryRegistry::new();
        registry.load_str(SAMPLE);
        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.cursor().next().is_none());
    }
}
