//! seograph: inspect the content graph built from the static catalogs.
//!
//! Lists canonical entities, ranks verses for a topic or intent, prints the
//! link sections of any page and validates generated copy.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use tracing::info;

use seograph::config::EngineSettings;
use seograph::domain::models::{CatalogKind, LinkSection, PageType};
use seograph::domain::pages::PageData;
use seograph::lifecycle;
use seograph::service::content::{self, ContentInput, ContentValidator, PageMetadata};
use seograph::service::linking::{self, PopularCategory, PopularityLookup};
use seograph::service::ContentGraph;

#[derive(Parser)]
#[command(name = "seograph")]
#[command(about = "Content relevance and internal-link-graph engine")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "seograph.toml", env = "SEOGRAPH_CONFIG")]
    config: PathBuf,

    /// Site base URL for generated links (overrides config file)
    #[arg(long, env = "SEOGRAPH_BASE_URL")]
    base_url: Option<String>,

    /// Print JSON instead of text where supported
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a page body and print the report
    Validate(ValidateArgs),
    #[command(flatten)]
    Graph(GraphCommand),
}

#[derive(Args)]
struct ValidateArgs {
    #[arg(long)]
    page_type: PageType,
    #[arg(long)]
    title: String,
    #[arg(long)]
    body: PathBuf,
    #[arg(long)]
    description: Option<String>,
    #[arg(long = "keyword")]
    keywords: Vec<String>,
}

/// Commands that need the loaded catalogs.
#[derive(Subcommand)]
enum GraphCommand {
    /// List publishable canonical entities, highest traffic first
    Canonical {
        #[arg(long)]
        intents: bool,
    },
    /// Rank corpus verses for a topic or intent key
    Matches {
        key: String,
        #[arg(long)]
        intents: bool,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print link sections, the flattened list and the policy verdict for a page.
    /// Chapter keys are written `book/chapter`, e.g. `genesis/1`.
    Links {
        key: String,
        #[arg(long, default_value = "topic")]
        page_type: PageType,
    },
    /// Print site-wide "You might also like" links
    Popular {
        /// Popular verses instead of topics
        #[arg(long)]
        verses: bool,
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Check the link policy for every publishable topic or intent page
    Audit {
        #[arg(long)]
        intents: bool,
    },
}

fn kind(intents: bool) -> CatalogKind {
    if intents {
        CatalogKind::Intent
    } else {
        CatalogKind::Topic
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lifecycle::init_logging();
    let cli = Cli::parse();

    let mut settings = EngineSettings::load(&cli.config)?;
    if let Some(base_url) = &cli.base_url {
        settings = settings.with_base_url(base_url)?;
    }

    match cli.command {
        // Validation needs no catalogs
        Command::Validate(args) => validate(&settings, args, cli.json).await,
        Command::Graph(command) => {
            let graph = lifecycle::bootstrap(settings).await?;
            run(&graph, command, cli.json).await
        }
    }
}

async fn validate(settings: &EngineSettings, args: ValidateArgs, json: bool) -> anyhow::Result<()> {
    let body = tokio::fs::read_to_string(&args.body)
        .await
        .with_context(|| format!("reading {}", args.body.display()))?;
    let input = ContentInput::new(args.page_type, args.title, body).with_metadata(PageMetadata {
        description: args.description,
        keywords: args.keywords,
    });
    let result = ContentValidator::new(settings.content.clone()).validate(&input);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", content::report(&result, settings.content.min_words(args.page_type)));
    }
    Ok(())
}

async fn run(graph: &ContentGraph, command: GraphCommand, json: bool) -> anyhow::Result<()> {
    match command {
        GraphCommand::Canonical { intents } => {
            for entity in graph.index(kind(intents)).publishable() {
                println!(
                    "{}\t{}\t{}\t{} variants",
                    entity.canonical_key,
                    entity.traffic_weight,
                    entity.title,
                    entity.variant_keys.len()
                );
            }
        }
        GraphCommand::Matches { key, intents, limit } => {
            let kind = kind(intents);
            let resolution = graph
                .index(kind)
                .resolve(&key)
                .with_context(|| format!("unknown {} '{}'", kind.as_str(), key))?;
            if resolution.is_redirect() {
                info!("{} redirects to {}", key, resolution.entity().canonical_key);
            }
            let limit = limit.unwrap_or(graph.settings().catalog(kind).match_limit);
            let matches = graph
                .scorer(kind)
                .score(resolution.entity(), graph.corpus().items(), limit);
            for m in matches {
                println!("{}\t{}\t{}", m.score, m.item.locator, m.item.default_text());
            }
        }
        GraphCommand::Links { key, page_type } => {
            let page = page_data(graph, page_type, &key)
                .await
                .with_context(|| format!("no {} page for '{}'", page_type, key))?;
            let sections = graph.page_links(&page);
            print_links(graph, &sections, json)?;
        }
        GraphCommand::Popular { verses, limit } => {
            let category = if verses {
                PopularCategory::Verse
            } else {
                PopularCategory::Topic
            };
            let lookup: &dyn PopularityLookup = graph.corpus();
            let links = graph.popular_pages(category, limit, Some(lookup)).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                for link in &links {
                    println!("{}\t{}", link.display_text, link.url);
                }
            }
        }
        GraphCommand::Audit { intents } => audit(graph, kind(intents)),
    }
    Ok(())
}

async fn page_data(graph: &ContentGraph, page_type: PageType, key: &str) -> Option<PageData> {
    match page_type {
        PageType::Topic => graph.topic_page(key),
        PageType::Intent => graph.intent_page(key),
        PageType::Book => graph.book_page(key),
        PageType::Chapter => {
            let (book, chapter) = key.split_once('/')?;
            graph.chapter_page(book, chapter.parse().ok()?)
        }
        PageType::Verse => {
            let lookup: &dyn PopularityLookup = graph.corpus();
            graph.verse_page_with(key, Some(lookup)).await
        }
    }
}

fn print_links(graph: &ContentGraph, sections: &[LinkSection], json: bool) -> anyhow::Result<()> {
    let policy = &graph.settings().links;
    let verdict = linking::validate_internal_linking(sections, policy);
    let flat = linking::flatten(sections, policy.flatten_limit);

    if json {
        let out = serde_json::json!({
            "sections": sections,
            "flattened": flat,
            "validation": verdict,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    for section in sections {
        println!("## {}", section.title);
        for link in &section.links {
            println!("  [{}] {} -> {}", link.priority, link.display_text, link.url);
        }
    }
    println!("\nTop {} links:", flat.len());
    for link in &flat {
        println!("  {}", link.url);
    }
    println!(
        "\n{} links, {}",
        verdict.total_link_count,
        if verdict.is_valid { "within policy" } else { "policy violations:" }
    );
    for warning in &verdict.warnings {
        println!("  - {warning}");
    }
    Ok(())
}

fn audit(graph: &ContentGraph, kind: CatalogKind) {
    let policy = &graph.settings().links;
    let keys: Vec<&str> = graph
        .index(kind)
        .publishable()
        .map(|e| e.canonical_key.as_str())
        .collect();

    let failures: Vec<(&str, Vec<String>)> = keys
        .par_iter()
        .filter_map(|key| {
            let page = match kind {
                CatalogKind::Topic => graph.topic_page(key),
                CatalogKind::Intent => graph.intent_page(key),
            }?;
            let verdict = linking::validate_internal_linking(&graph.page_links(&page), policy);
            (!verdict.is_valid).then_some((*key, verdict.warnings))
        })
        .collect();

    for (key, warnings) in &failures {
        println!("{key}: {}", warnings.join("; "));
    }
    info!(
        "[LINKS] audited {} {} pages, {} outside policy",
        keys.len(),
        kind.as_str(),
        failures.len()
    );
}
