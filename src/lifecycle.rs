//! Process startup: logging and the one-time engine build.

use crate::config::EngineSettings;
use crate::domain::models::CatalogKind;
use crate::error::Result;
use crate::repository::{CatalogRepository, JsonCatalogRepository};
use crate::service::canonicalizer::CatalogIndex;
use crate::service::corpus::Corpus;
use crate::service::ContentGraph;

/// Initialize logging with tracing_subscriber.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,seograph=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Load every data file named in `settings` and build the engine.
pub async fn bootstrap(settings: EngineSettings) -> Result<ContentGraph> {
    let repo = JsonCatalogRepository::new(settings.data.clone());
    build_graph(&repo, settings).await
}

/// Build the engine from any repository. Loads run concurrently; the
/// indexes are built once and are read-only afterwards.
pub async fn build_graph(repo: &dyn CatalogRepository, settings: EngineSettings) -> Result<ContentGraph> {
    let (
        topic_entries,
        intent_entries,
        corpus_items,
        topic_aliases,
        intent_aliases,
        topic_keywords,
        intent_keywords,
    ) = tokio::try_join!(
        repo.load_catalog(CatalogKind::Topic),
        repo.load_catalog(CatalogKind::Intent),
        repo.load_corpus(),
        repo.load_aliases(CatalogKind::Topic),
        repo.load_aliases(CatalogKind::Intent),
        repo.load_keywords(CatalogKind::Topic),
        repo.load_keywords(CatalogKind::Intent),
    )?;

    let topics = CatalogIndex::build(
        CatalogKind::Topic,
        &topic_entries,
        topic_aliases,
        settings.topics.min_traffic,
    );
    let intents = CatalogIndex::build(
        CatalogKind::Intent,
        &intent_entries,
        intent_aliases,
        settings.intents.min_traffic,
    );
    let corpus = Corpus::new(corpus_items);

    tracing::info!(
        "[LOAD] engine ready: {} topics ({} publishable), {} intents ({} publishable), {} verses",
        topics.len(),
        topics.publishable().count(),
        intents.len(),
        intents.publishable().count(),
        corpus.len()
    );

    Ok(ContentGraph::new(
        settings,
        topics,
        intents,
        corpus,
        topic_keywords,
        intent_keywords,
    ))
}
