//! HextaUI Catalog CLI commands
//!
//! Terminal access to the same registry the server uses, plus a
//! `validate` command for checking catalog data before deploying it.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use hextaui_core::catalog::{CatalogEntry, CatalogIndex, CatalogKind, Category, Registry};
use hextaui_core::config::SiteConfig;
use hextaui_core::markdown::{MarkdownGenerator, PackageManager};

#[derive(Subcommand, Debug)]
pub enum CatalogSubcommand {
    /// List entries of a catalog (components or blocks)
    List {
        kind: CatalogKind,

        /// Only show blocks in this category (ai, auth, billing, settings, team, tasks)
        #[clap(long)]
        category: Option<Category>,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Search entries by id, title and description
    Search {
        query: String,

        /// Restrict to one catalog (searches both if omitted)
        #[clap(long)]
        kind: Option<CatalogKind>,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show detailed information about an entry
    Show {
        kind: CatalogKind,
        id: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },

    /// Print the markdown export of an entry
    Markdown {
        kind: CatalogKind,
        id: String,

        /// Package manager for the default install command
        #[clap(long, default_value = "npm")]
        pm: PackageManager,
    },

    /// Validate catalog data files
    Validate {
        /// Directory containing catalog YAML files (embedded data if omitted)
        #[clap(long)]
        data_dir: Option<PathBuf>,
    },
}

impl CatalogSubcommand {
    pub fn execute(self, config: &SiteConfig) -> Result<()> {
        let load = || Registry::load(config.data_dir.as_deref()).context("Failed to load catalog");
        let generator = MarkdownGenerator::new(&config.base_url);

        match self {
            CatalogSubcommand::List {
                kind,
                category,
                json,
            } => execute_list(load()?.catalog(kind), category, json),
            CatalogSubcommand::Search { query, kind, json } => {
                execute_search(&load()?, &query, kind, json)
            }
            CatalogSubcommand::Show { kind, id, json } => {
                execute_show(load()?.catalog(kind), &generator, id.trim(), json)
            }
            CatalogSubcommand::Markdown { kind, id, pm } => {
                print!("{}", render_markdown(&load()?, &generator, kind, &id, pm)?);
                Ok(())
            }
            CatalogSubcommand::Validate { data_dir } => {
                execute_validate(data_dir.as_deref().or(config.data_dir.as_deref()))
            }
        }
    }
}

/// Table row for listings
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl EntryRow {
    fn new(kind: CatalogKind, entry: &CatalogEntry) -> Self {
        Self {
            kind: kind.label().to_string(),
            id: entry.id.clone(),
            title: entry.title.clone(),
            category: entry
                .category
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            description: truncate(entry.short_description(), 50),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn print_table(rows: &[EntryRow]) {
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
}

fn entry_json(kind: CatalogKind, entry: &CatalogEntry) -> serde_json::Value {
    serde_json::json!({
        "kind": kind,
        "id": entry.id,
        "title": entry.title,
        "description": entry.description,
        "category": entry.category,
    })
}

fn execute_list(catalog: &CatalogIndex, category: Option<Category>, json: bool) -> Result<()> {
    let kind = catalog.kind();
    let entries: Vec<&CatalogEntry> = match category {
        Some(c) => catalog.get_by_category(c),
        None => catalog.list_all().iter().collect(),
    };

    if json {
        let values: Vec<serde_json::Value> =
            entries.iter().map(|e| entry_json(kind, e)).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No {kind} found.");
        return Ok(());
    }

    println!("{} {}:\n", entries.len(), kind);
    let rows: Vec<EntryRow> = entries.iter().map(|e| EntryRow::new(kind, e)).collect();
    print_table(&rows);
    Ok(())
}

fn search_registry<'a>(
    registry: &'a Registry,
    query: &str,
    kind: Option<CatalogKind>,
) -> Vec<(CatalogKind, &'a CatalogEntry)> {
    let kinds: Vec<CatalogKind> = match kind {
        Some(k) => vec![k],
        None => CatalogKind::ALL.to_vec(),
    };

    kinds
        .into_iter()
        .flat_map(|k| {
            registry
                .catalog(k)
                .search(query)
                .into_iter()
                .map(move |e| (k, e))
        })
        .collect()
}

fn execute_search(
    registry: &Registry,
    query: &str,
    kind: Option<CatalogKind>,
    json: bool,
) -> Result<()> {
    let results = search_registry(registry, query, kind);

    if json {
        let values: Vec<serde_json::Value> =
            results.iter().map(|(k, e)| entry_json(*k, e)).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No entries matching '{query}'.");
        return Ok(());
    }

    println!("Found {} entr{}:\n", results.len(), if results.len() == 1 { "y" } else { "ies" });
    let rows: Vec<EntryRow> = results.iter().map(|(k, e)| EntryRow::new(*k, e)).collect();
    print_table(&rows);
    Ok(())
}

fn execute_show(
    catalog: &CatalogIndex,
    generator: &MarkdownGenerator,
    id: &str,
    json: bool,
) -> Result<()> {
    let kind = catalog.kind();
    let entry = catalog
        .get_by_id(id)
        .with_context(|| format!("{} '{}' not found", kind.label(), id))?;
    let nav = catalog.prev_next(id);

    if json {
        let output = serde_json::json!({
            "kind": kind,
            "entry": entry,
            "url": generator.entry_url(kind, id),
            "prev": nav.prev.map(|e| &e.id),
            "next": nav.next.map(|e| &e.id),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("{}: {}", kind.label(), entry.title);
    println!("Id:       {}", entry.id);
    if let Some(category) = entry.category {
        println!("Category: {}", category.label());
    }
    println!("URL:      {}", generator.entry_url(kind, id));

    if let Some(description) = &entry.description {
        println!();
        println!("Description:");
        for line in description.lines() {
            println!("  {line}");
        }
    }

    println!();
    println!("Installation:");
    match &entry.install_code {
        Some(code) => println!("  {code}"),
        None => {
            for pm in PackageManager::ALL {
                println!("  {}", pm.install_command(&entry.id));
            }
        }
    }

    if entry.has_links() {
        println!();
        println!("Links:");
        if let Some(docs) = &entry.docs_ref {
            println!("  Documentation: {docs}");
        }
        if let Some(api) = &entry.api_ref {
            println!("  API Reference: {api}");
        }
    }

    println!();
    if let Some(prev) = nav.prev {
        println!("Previous: {} ({})", prev.title, prev.id);
    }
    if let Some(next) = nav.next {
        println!("Next:     {} ({})", next.title, next.id);
    }

    Ok(())
}

fn render_markdown(
    registry: &Registry,
    generator: &MarkdownGenerator,
    kind: CatalogKind,
    id: &str,
    pm: PackageManager,
) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("{} ID is required", kind.label());
    }

    let entry = registry
        .catalog(kind)
        .get_by_id(id)
        .with_context(|| format!("{} '{}' not found", kind.label(), id))?;

    generator
        .render_entry(kind, entry, pm)
        .with_context(|| format!("Failed to generate markdown for '{id}'"))
}

/// Warnings for entries that load fine but render thin documents
fn lint_catalog(catalog: &CatalogIndex) -> Vec<String> {
    let kind = catalog.kind();
    let mut warnings = Vec::new();

    for entry in catalog.list_all() {
        if entry.description.is_none() {
            warnings.push(format!("{} '{}' has no description", kind.label(), entry.id));
        }
        if !entry.has_usage() {
            warnings.push(format!("{} '{}' has no usage snippets", kind.label(), entry.id));
        }
    }

    warnings
}

fn execute_validate(data_dir: Option<&std::path::Path>) -> Result<()> {
    match data_dir {
        Some(dir) => println!("Validating catalog data in {}...", dir.display()),
        None => println!("Validating embedded catalog data..."),
    }

    let registry = Registry::load(data_dir).context("Catalog data is invalid")?;

    for kind in CatalogKind::ALL {
        let catalog = registry.catalog(kind);
        println!("\n✅ {}: {} entries", kind, catalog.len());

        let warnings = lint_catalog(catalog);
        for warning in &warnings {
            println!("   ⚠️  {warning}");
        }
    }

    Ok(())
}
