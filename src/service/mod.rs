pub mod canonicalizer;
pub mod content;
pub mod corpus;
pub mod graph;
pub mod linking;
pub mod related;
pub mod scorer;

pub use canonicalizer::{canonicalize, AliasTable, CatalogIndex, Resolution};
pub use content::{check_uniqueness, ContentInput, ContentThresholds, ContentValidator};
pub use corpus::Corpus;
pub use graph::ContentGraph;
pub use linking::{
    assemble_links, flatten, validate_internal_linking, LinkPolicy, PopularCategory, PopularityLookup,
};
pub use scorer::{score, CuratedKeywords, KeywordRules, RelevanceScorer};
