//! The company policy document.
//!
//! Loaded once from disk at process start and immutable for the process
//! lifetime. A missing or empty document is a startup failure: every answer
//! the policy agent gives is grounded in this text, so there is nothing
//! useful the process can do without it.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("could not read policy document `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("policy document `{0}` is empty")]
    Empty(PathBuf),
}

/// An immutable policy text blob.
#[derive(Clone, Debug)]
pub struct PolicyDocument {
    text: String,
}

impl PolicyDocument {
    /// Read the document eagerly. Fails if the file is unreadable or contains
    /// only whitespace.
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let text = fs::read_to_string(path)
            .map_err(|source| PolicyError::Read { path: path.to_path_buf(), source })?;

        if text.trim().is_empty() {
            return Err(PolicyError::Empty(path.to_path_buf()));
        }

        Ok(Self { text })
    }

    /// Build a document from in-memory text. Used by fixtures and tests.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The exact contents as read from disk.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::{PolicyDocument, PolicyError};

    #[test]
    fn load_returns_exact_file_contents() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("policy.md");
        let contents = "# Policy\n\nRefunds are processed within 14 days.\n";
        fs::write(&path, contents).expect("write policy");

        let document = PolicyDocument::load(&path).expect("load policy");
        assert_eq!(document.text(), contents);
    }

    #[test]
    fn missing_file_fails_to_load() {
        let dir = TempDir::new().expect("tempdir");
        let result = PolicyDocument::load(&dir.path().join("absent.md"));
        assert!(matches!(result, Err(PolicyError::Read { .. })));
    }

    #[test]
    fn whitespace_only_file_is_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("policy.md");
        fs::write(&path, "  \n\t\n").expect("write policy");

        let result = PolicyDocument::load(&path);
        assert!(matches!(result, Err(PolicyError::Empty(_))));
    }
}
