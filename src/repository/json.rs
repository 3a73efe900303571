//! JSON file repository for the data pipeline exports.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::config::DataPaths;
use crate::domain::adapters::{CatalogRecord, VerseRecord};
use crate::domain::models::{CatalogEntry, CatalogKind, ContentItem};
use crate::error::{AppError, Result};
use crate::service::canonicalizer::AliasTable;
use crate::service::scorer::CuratedKeywords;

use super::CatalogRepository;

pub struct JsonCatalogRepository {
    paths: DataPaths,
}

impl JsonCatalogRepository {
    pub fn new(paths: DataPaths) -> Self {
        Self { paths }
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::io(path, e))?;
        serde_json::from_slice(&raw).map_err(|e| AppError::json(path, e))
    }

    /// Read an optional table; an unset path means "no table".
    async fn read_optional<T: DeserializeOwned + Default>(path: Option<&PathBuf>) -> Result<T> {
        match path {
            Some(path) => Self::read_json(path).await,
            None => Ok(T::default()),
        }
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogRepository {
    async fn load_catalog(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>> {
        let path = match kind {
            CatalogKind::Topic => &self.paths.topics,
            CatalogKind::Intent => &self.paths.intents,
        };
        let records: Vec<CatalogRecord> = Self::read_json(path).await?;
        tracing::info!(
            "[LOAD] {} {} catalog entries from {}",
            records.len(),
            kind.as_str(),
            path.display()
        );
        Ok(records.into_iter().map(CatalogEntry::from).collect())
    }

    async fn load_corpus(&self) -> Result<Vec<ContentItem>> {
        let records: Vec<VerseRecord> = Self::read_json(&self.paths.corpus).await?;
        tracing::info!(
            "[LOAD] {} verses from {}",
            records.len(),
            self.paths.corpus.display()
        );
        Ok(records.into_iter().map(ContentItem::from).collect())
    }

    async fn load_aliases(&self, kind: CatalogKind) -> Result<AliasTable> {
        let path = match kind {
            CatalogKind::Topic => self.paths.topic_aliases.as_ref(),
            CatalogKind::Intent => self.paths.intent_aliases.as_ref(),
        };
        Self::read_optional(path).await
    }

    async fn load_keywords(&self, kind: CatalogKind) -> Result<CuratedKeywords> {
        let path = match kind {
            CatalogKind::Topic => self.paths.topic_keywords.as_ref(),
            CatalogKind::Intent => self.paths.intent_keywords.as_ref(),
        };
        Self::read_optional(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn loads_catalog_records() {
        let dir = tempfile::tempdir().unwrap();
        let topics = write(
            dir.path(),
            "topics.json",
            r#"[{"slug":"love","title":"Love","searchVolume":9000,"competition":0.4},
               {"slug":"  ","title":"Blank"}]"#,
        );
        let repo = JsonCatalogRepository::new(DataPaths { topics, ..Default::default() });

        let entries = repo.load_catalog(CatalogKind::Topic).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "love");
        assert_eq!(entries[0].traffic_weight, 9000);
        assert_eq!(entries[0].competition_weight, Some(0.4));
        // Blank keys pass through; the canonicalizer drops them
        assert_eq!(entries[1].key, "");
    }

    #[tokio::test]
    async fn unset_optional_tables_are_empty() {
        let repo = JsonCatalogRepository::new(DataPaths::default());
        assert!(repo.load_aliases(CatalogKind::Intent).await.unwrap().is_empty());
        assert!(repo.load_keywords(CatalogKind::Topic).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_and_malformed_files_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCatalogRepository::new(DataPaths {
            corpus: dir.path().join("missing.json"),
            topic_aliases: Some(write(dir.path(), "aliases.json", "[1, 2]")),
            ..Default::default()
        });

        assert!(matches!(repo.load_corpus().await, Err(AppError::Io { .. })));
        assert!(matches!(
            repo.load_aliases(CatalogKind::Topic).await,
            Err(AppError::Json { .. })
        ));
    }
}
