//! Markdown export for catalog entries
//!
//! Renders a `CatalogEntry` as a standalone markdown document for the
//! "copy as markdown" button and for LLM ingestion. Output depends only on
//! the entry, the base URL and the package manager, so the same input
//! always yields byte-identical text.
//!
//! Sections whose source data is absent are omitted entirely, heading
//! included.

mod install;

pub use install::{PackageManager, UnknownPackageManager, REGISTRY_NAMESPACE};

use std::fmt::{self, Write};

use crate::catalog::{non_blank, CatalogEntry, CatalogKind, Registry};

/// Public site URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://hextaui.com";

/// Renders catalog entries against a fixed base URL
#[derive(Debug, Clone)]
pub struct MarkdownGenerator {
    base_url: String,
}

impl Default for MarkdownGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MarkdownGenerator {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Page URL for an entry, e.g. `https://hextaui.com/components/button`
    pub fn entry_url(&self, kind: CatalogKind, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, kind.segment(), id)
    }

    /// Markdown endpoint URL for an entry
    pub fn markdown_url(&self, kind: CatalogKind, id: &str) -> String {
        format!("{}/markdown", self.entry_url(kind, id))
    }

    /// Render one entry as a markdown document
    pub fn render_entry(
        &self,
        kind: CatalogKind,
        entry: &CatalogEntry,
        package_manager: PackageManager,
    ) -> Result<String, fmt::Error> {
        let mut out = String::new();

        writeln!(out, "# {}", entry.title)?;
        writeln!(out)?;

        if let Some(description) = non_blank(&entry.description) {
            writeln!(out, "{}", description.trim_end())?;
            writeln!(out)?;
        }

        writeln!(out, "**{} ID:** `{}`", kind.label(), entry.id)?;
        if kind == CatalogKind::Blocks {
            if let Some(category) = entry.category {
                writeln!(out, "**Category:** {}", category.label())?;
            }
        }
        let url = self.entry_url(kind, &entry.id);
        writeln!(out, "**URL:** [{url}]({url})")?;
        writeln!(out)?;

        if entry.has_links() {
            writeln!(out, "## Links")?;
            if let Some(docs) = non_blank(&entry.docs_ref) {
                writeln!(out, "- [Documentation]({docs})")?;
            }
            if let Some(api) = non_blank(&entry.api_ref) {
                writeln!(out, "- [API Reference]({api})")?;
            }
            writeln!(out)?;
        }

        let install = match non_blank(&entry.install_code) {
            Some(custom) => custom.to_string(),
            None => package_manager.install_command(&entry.id),
        };
        writeln!(out, "## Installation")?;
        write_code_block(&mut out, "bash", &install)?;
        writeln!(out)?;

        if entry.has_usage() {
            writeln!(out, "## Usage")?;
            if let Some(imports) = non_blank(&entry.usage_imports) {
                writeln!(out, "### Imports")?;
                write_code_block(&mut out, "tsx", imports)?;
            }
            if let Some(code) = non_blank(&entry.usage_code) {
                writeln!(out, "### Example")?;
                write_code_block(&mut out, "tsx", code)?;
            }
            writeln!(out)?;
        }

        writeln!(out, "---")?;
        writeln!(out)?;
        writeln!(out, "*Generated from [HextaUI]({})*", self.base_url)?;

        Ok(out)
    }

    /// Render an `llms.txt` style index of both catalogs, linking every
    /// entry's markdown export. Blocks are grouped by category.
    pub fn render_index(&self, registry: &Registry) -> Result<String, fmt::Error> {
        let mut out = String::new();

        writeln!(out, "# HextaUI")?;
        writeln!(out)?;
        writeln!(
            out,
            "> Copy-paste components and blocks for React, built on Base UI and Tailwind CSS."
        )?;
        writeln!(out)?;

        writeln!(out, "## Components")?;
        writeln!(out)?;
        for entry in registry.components().list_all() {
            self.write_index_line(&mut out, CatalogKind::Components, entry)?;
        }
        writeln!(out)?;

        writeln!(out, "## Blocks")?;
        for (category, entries) in registry.blocks().grouped_by_category() {
            writeln!(out)?;
            writeln!(out, "### {}", category.label())?;
            writeln!(out)?;
            for entry in entries {
                self.write_index_line(&mut out, CatalogKind::Blocks, entry)?;
            }
        }

        Ok(out)
    }

    fn write_index_line(
        &self,
        out: &mut String,
        kind: CatalogKind,
        entry: &CatalogEntry,
    ) -> fmt::Result {
        let url = self.markdown_url(kind, &entry.id);
        match entry.short_description() {
            "" => writeln!(out, "- [{}]({url})", entry.title),
            desc => writeln!(out, "- [{}]({url}): {desc}", entry.title),
        }
    }
}

/// Write a fenced code block whose fence is longer than any backtick run in
/// `content`
fn write_code_block(out: &mut String, lang: &str, content: &str) -> fmt::Result {
    let fence = "`".repeat(fence_len(content));
    writeln!(out, "{fence}{lang}")?;
    writeln!(out, "{}", content.trim_end_matches('\n'))?;
    writeln!(out, "{fence}")
}

fn fence_len(content: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    for c in content.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    (longest + 1).max(3)
}
