//! JSON export of the article collection.
//!
//! The exported document has the same shape as the `kms_articles` payload,
//! pretty-printed with two-space indentation.

use crate::model::article::Article;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name offered for downloads/exports.
pub const EXPORT_FILE_NAME: &str = "knowledge-base-articles.json";

#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io(std::io::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to encode articles: {err}"),
            Self::Io(err) => write!(f, "failed to write export: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Encodes `articles` as pretty-printed JSON.
pub fn export_articles_json(articles: &[Article]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(articles)?)
}

/// Writes [`EXPORT_FILE_NAME`] into `dir` and returns the written path.
pub fn write_export(dir: impl AsRef<Path>, articles: &[Article]) -> Result<PathBuf, ExportError> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    let json = export_articles_json(articles)?;
    std::fs::write(&path, json)?;
    info!(
        "event=articles_export module=export status=ok articles={} path={}",
        articles.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::export_articles_json;
    use crate::model::seed::default_articles;

    #[test]
    fn export_uses_two_space_indent_and_storage_field_names() {
        let articles = default_articles();
        let json = export_articles_json(&articles[..1]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(json.contains("\"lastUpdated\": \"2023-05-15\""));
        assert!(json.contains("\"status\": \"published\""));
    }

    #[test]
    fn export_of_empty_collection_is_empty_array() {
        assert_eq!(export_articles_json(&[]).unwrap(), "[]");
    }
}
