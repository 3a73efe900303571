//! Engine settings, loaded from a TOML file.
//!
//! Every section has defaults matching the production site, so an absent
//! file or an absent table is fine. Example:
//!
//! ```toml
//! [data]
//! topics = "data/topics-master.json"
//! corpus = "data/priority-1000.json"
//!
//! [intents]
//! min_traffic = 800
//! match_limit = 15
//! strip_prefixes = ["for-"]
//!
//! [links]
//! base_url = "https://bibleverserandomizer.com"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::domain::models::CatalogKind;
use crate::error::{AppError, Result};
use crate::service::content::ContentThresholds;
use crate::service::linking::LinkPolicy;

/// Locations of the static catalogs and corpus.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub topics: PathBuf,
    pub intents: PathBuf,
    pub corpus: PathBuf,
    pub topic_aliases: Option<PathBuf>,
    pub intent_aliases: Option<PathBuf>,
    pub topic_keywords: Option<PathBuf>,
    pub intent_keywords: Option<PathBuf>,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            topics: PathBuf::from("data/topics-master.json"),
            intents: PathBuf::from("data/intents-master.json"),
            corpus: PathBuf::from("data/priority-1000.json"),
            topic_aliases: None,
            intent_aliases: None,
            topic_keywords: None,
            intent_keywords: None,
        }
    }
}

/// Per-catalog publication and matching knobs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Entities below this traffic weight resolve but are not listed.
    pub min_traffic: u64,
    /// How many ranked verses a page of this catalog shows.
    pub match_limit: usize,
    /// Key prefixes ignored when deriving keywords (e.g. "for-").
    pub strip_prefixes: Vec<String>,
}

impl CatalogSettings {
    pub fn topics() -> Self {
        Self { min_traffic: 5000, match_limit: 20, strip_prefixes: Vec::new() }
    }

    pub fn intents() -> Self {
        Self {
            min_traffic: 800,
            match_limit: 15,
            strip_prefixes: vec!["for-".to_string()],
        }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self::topics()
    }
}

/// A `[topics]`/`[intents]` table as written, layered over that catalog's
/// own defaults so a partial intents table keeps the intent prefixes.
#[derive(Debug, Default, Deserialize)]
struct CatalogTable {
    min_traffic: Option<u64>,
    match_limit: Option<usize>,
    strip_prefixes: Option<Vec<String>>,
}

impl CatalogTable {
    fn over(self, base: CatalogSettings) -> CatalogSettings {
        CatalogSettings {
            min_traffic: self.min_traffic.unwrap_or(base.min_traffic),
            match_limit: self.match_limit.unwrap_or(base.match_limit),
            strip_prefixes: self.strip_prefixes.unwrap_or(base.strip_prefixes),
        }
    }
}

fn topics_table<'de, D: serde::Deserializer<'de>>(d: D) -> std::result::Result<CatalogSettings, D::Error> {
    Ok(CatalogTable::deserialize(d)?.over(CatalogSettings::topics()))
}

fn intents_table<'de, D: serde::Deserializer<'de>>(d: D) -> std::result::Result<CatalogSettings, D::Error> {
    Ok(CatalogTable::deserialize(d)?.over(CatalogSettings::intents()))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub data: DataPaths,
    #[serde(deserialize_with = "topics_table")]
    pub topics: CatalogSettings,
    #[serde(deserialize_with = "intents_table")]
    pub intents: CatalogSettings,
    pub links: LinkPolicy,
    pub content: ContentThresholds,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            data: DataPaths::default(),
            topics: CatalogSettings::topics(),
            intents: CatalogSettings::intents(),
            links: LinkPolicy::default(),
            content: ContentThresholds::default(),
        }
    }
}

impl EngineSettings {
    /// Load settings from `path`; a missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("[CONFIG] {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let settings = Self::from_toml(&raw).map_err(|source| AppError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("[CONFIG] loaded {}", path.display());
        Ok(settings)
    }

    pub fn from_toml(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Override the site base URL used for every generated link.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.links.base_url =
            Url::parse(base_url).map_err(|e| AppError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        Ok(self)
    }

    pub fn catalog(&self, kind: CatalogKind) -> &CatalogSettings {
        match kind {
            CatalogKind::Topic => &self.topics,
            CatalogKind::Intent => &self.intents,
        }
    }
}
