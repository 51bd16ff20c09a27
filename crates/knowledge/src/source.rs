//! Directory-backed document source.

use async_trait::async_trait;
use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::{Document, DocumentSource};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads every file in one folder whose extension is allowed.
///
/// Files are returned in file-name order. Subdirectories are not visited.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            dir: dir.into(),
            extensions: extensions
                .into_iter()
                .map(|e| {
                    let e: String = e.into();
                    e.trim_start_matches('.').to_lowercase()
                })
                .collect(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(e)))
    }

    fn source_error(path: &Path, e: std::io::Error) -> KnowledgeError {
        KnowledgeError::Source {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn documents(&self) -> Result<Vec<Document>, KnowledgeError> {
        let mut reader = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| Self::source_error(&self.dir, e))?;

        let mut paths = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| Self::source_error(&self.dir, e))?
        {
            let path = entry.path();
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| Self::source_error(&path, e))?
                .is_file();
            if is_file && self.accepts(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Self::source_error(&path, e))?;
            debug!(path = %path.display(), bytes = text.len(), "Read document");
            documents.push(Document::new(path.display().to_string(), text));
        }
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_allowed_files_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b-travel.md"), "Travel policy").unwrap();
        std::fs::write(dir.path().join("a-benefits.txt"), "Fitness benefits").unwrap();
        std::fs::write(dir.path().join("logo.png"), [0u8, 1, 2]).unwrap();
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let source = DirectorySource::new(dir.path(), ["txt", ".MD"]);
        let docs = source.documents().await.unwrap();

        let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["Fitness benefits", "Travel policy"]);
        assert!(docs[0].source.ends_with("a-benefits.txt"));
    }

    #[tokio::test]
    async fn missing_directory_is_a_source_error() {
        let source = DirectorySource::new("/nonexistent/ragent-knowledge", ["txt"]);
        let err = source.documents().await.unwrap_err();
        assert!(matches!(err, KnowledgeError::Source { .. }));
    }

    #[tokio::test]
    async fn empty_directory_has_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path(), ["txt"]);
        assert!(source.documents().await.unwrap().is_empty());
    }
}
