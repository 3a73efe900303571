use async_trait::async_trait;

use crate::domain::models::{CatalogEntry, CatalogKind, ContentItem};
use crate::error::Result;
use crate::service::canonicalizer::AliasTable;
use crate::service::scorer::CuratedKeywords;

pub mod json;

pub use json::JsonCatalogRepository;

/// Source of the static catalogs, corpus and hand-curated tables.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn load_catalog(&self, kind: CatalogKind) -> Result<Vec<CatalogEntry>>;
    async fn load_corpus(&self) -> Result<Vec<ContentItem>>;
    /// Empty when no alias table is configured for `kind`.
    async fn load_aliases(&self, kind: CatalogKind) -> Result<AliasTable>;
    /// Empty when no curated keyword table is configured for `kind`.
    async fn load_keywords(&self, kind: CatalogKind) -> Result<CuratedKeywords>;
}
