//! Catalog index: the ordered, read-only table of entries for one catalog
//!
//! Built once from a list of base entries and a snippet lookup, then shared
//! by reference. Insertion order drives prev/next navigation and the order
//! of entries inside each category group.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{CatalogEntry, CatalogError, CatalogKind, Category, EntrySnippets};

/// Entry data file (`components.yaml`, `blocks.yaml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryFile {
    #[serde(default)]
    pub entries: Vec<CatalogEntry>,
}

/// Snippet data file (`components.snippets.yaml`, `blocks.snippets.yaml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnippetFile {
    #[serde(default)]
    pub snippets: HashMap<String, EntrySnippets>,
}

impl EntryFile {
    /// Parse from YAML. `origin` names the source in error messages.
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self, CatalogError> {
        serde_yaml_ng::from_str(content).map_err(|source| CatalogError::ParseError {
            origin: origin.to_string(),
            source,
        })
    }
}

impl SnippetFile {
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self, CatalogError> {
        serde_yaml_ng::from_str(content).map_err(|source| CatalogError::ParseError {
            origin: origin.to_string(),
            source,
        })
    }
}

/// Neighbours of an entry in table order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrevNext<'a> {
    pub prev: Option<&'a CatalogEntry>,
    pub next: Option<&'a CatalogEntry>,
}

/// The ordered entries of one catalog
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    kind: CatalogKind,
    entries: Vec<CatalogEntry>,
    positions: HashMap<String, usize>,
}

impl CatalogIndex {
    /// Build a table from base entries and per-id snippet overrides.
    ///
    /// Components are sorted by title; blocks keep authored order. Blank
    /// text fields are treated as absent. Fails on the first invalid entry,
    /// uncategorized block or duplicate id.
    pub fn build(
        kind: CatalogKind,
        entries: Vec<CatalogEntry>,
        snippets: &HashMap<String, EntrySnippets>,
    ) -> Result<Self, CatalogError> {
        let mut merged = Vec::with_capacity(entries.len());

        for entry in entries {
            entry.validate()?;
            let entry = match snippets.get(&entry.id) {
                Some(overrides) => entry.merge_snippets(overrides),
                None => entry,
            };
            merged.push(entry.without_blank_fields().checked_category(kind)?);
        }

        for id in snippets.keys() {
            if !merged.iter().any(|e| &e.id == id) {
                tracing::warn!("Ignoring snippets for unknown {} id '{}'", kind.label(), id);
            }
        }

        if kind.sorts_by_title() {
            merged.sort_by_key(|e| e.title.to_lowercase());
        }

        let mut positions = HashMap::with_capacity(merged.len());
        for (i, entry) in merged.iter().enumerate() {
            if positions.insert(entry.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId {
                    kind,
                    id: entry.id.clone(),
                });
            }
        }

        tracing::debug!("Built {} catalog with {} entries", kind, merged.len());

        Ok(Self {
            kind,
            entries: merged,
            positions,
        })
    }

    /// Build from parsed data files
    pub fn from_files(
        kind: CatalogKind,
        entries: EntryFile,
        snippets: Option<SnippetFile>,
    ) -> Result<Self, CatalogError> {
        let snippets = snippets.map(|s| s.snippets).unwrap_or_default();
        Self::build(kind, entries.entries, &snippets)
    }

    /// An empty table
    pub fn empty(kind: CatalogKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Look up an entry by id. Unknown ids are `None`, not an error.
    pub fn get_by_id(&self, id: &str) -> Option<&CatalogEntry> {
        self.positions.get(id).map(|&i| &self.entries[i])
    }

    /// Entries in the given category, in table order
    pub fn get_by_category(&self, category: Category) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == Some(category))
            .collect()
    }

    /// Previous and next entries around `id`. Both are `None` for an
    /// unknown id.
    pub fn prev_next(&self, id: &str) -> PrevNext<'_> {
        let Some(&index) = self.positions.get(id) else {
            return PrevNext::default();
        };

        PrevNext {
            prev: index.checked_sub(1).map(|i| &self.entries[i]),
            next: self.entries.get(index + 1),
        }
    }

    /// Search entries by query string
    ///
    /// Matches against id, title, and description (case-insensitive).
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        let query_lower = query.trim().to_lowercase();

        self.entries
            .iter()
            .filter(|entry| {
                entry.id.contains(&query_lower)
                    || entry.title.to_lowercase().contains(&query_lower)
                    || entry
                        .description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&query_lower))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Entries grouped by category, groups in order of first appearance.
    /// Uncategorized entries are skipped.
    pub fn grouped_by_category(&self) -> Vec<(Category, Vec<&CatalogEntry>)> {
        let mut groups: Vec<(Category, Vec<&CatalogEntry>)> = Vec::new();

        for entry in &self.entries {
            let Some(category) = entry.category else {
                continue;
            };
            match groups.iter_mut().find(|(c, _)| *c == category) {
                Some((_, members)) => members.push(entry),
                None => groups.push((category, vec![entry])),
            }
        }

        groups
    }

    pub fn list_all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod index_tests {
    use super::*;

    fn sample_blocks_yaml() -> &'static str {
        r#"
entries:
  - id: ai-chat
    title: AI Chat
    category: ai
    description: Conversational chat surface
  - id: sign-in
    title: Sign In
    category: auth
  - id: ai-prompt
    title: AI Prompt Box
    category: ai
  - id: pricing-table
    title: Pricing Table
    category: billing
"#
    }

    fn sample_blocks() -> CatalogIndex {
        let file = EntryFile::from_yaml(sample_blocks_yaml(), "test").unwrap();
        CatalogIndex::from_files(CatalogKind::Blocks, file, None).unwrap()
    }

    #[test]
    fn test_get_by_id() {
        let index = sample_blocks();

        for id in ["ai-chat", "sign-in", "ai-prompt", "pricing-table"] {
            assert_eq!(index.get_by_id(id).unwrap().id, id);
        }

        assert!(index.get_by_id("nonexistent").is_none());
        assert!(index.get_by_id("").is_none());
    }

    #[test]
    fn test_blocks_keep_authored_order() {
        let index = sample_blocks();
        let ids: Vec<&str> = index.ids().collect();
        assert_eq!(ids, vec!["ai-chat", "sign-in", "ai-prompt", "pricing-table"]);
    }

    #[test]
    fn test_components_sorted_by_title() {
        let entries = vec![
            CatalogEntry::new("tooltip", "Tooltip"),
            CatalogEntry::new("accordion", "Accordion"),
            CatalogEntry::new("input-otp", "input OTP"),
            CatalogEntry::new("badge", "Badge"),
        ];
        let index = CatalogIndex::build(CatalogKind::Components, entries, &HashMap::new()).unwrap();

        let ids: Vec<&str> = index.ids().collect();
        assert_eq!(ids, vec!["accordion", "badge", "input-otp", "tooltip"]);
    }

    #[test]
    fn test_get_by_category_preserves_order() {
        let index = sample_blocks();

        let ai: Vec<&str> = index
            .get_by_category(Category::Ai)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ai, vec!["ai-chat", "ai-prompt"]);

        assert!(index.get_by_category(Category::Team).is_empty());
    }

    #[test]
    fn test_grouped_by_category() {
        let index = sample_blocks();
        let groups = index.grouped_by_category();

        let categories: Vec<Category> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![Category::Ai, Category::Auth, Category::Billing]
        );
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn test_prev_next_boundaries() {
        let index = sample_blocks();

        let first = index.prev_next("ai-chat");
        assert!(first.prev.is_none());
        assert_eq!(first.next.unwrap().id, "sign-in");

        let middle = index.prev_next("ai-prompt");
        assert_eq!(middle.prev.unwrap().id, "sign-in");
        assert_eq!(middle.next.unwrap().id, "pricing-table");

        let last = index.prev_next("pricing-table");
        assert_eq!(last.prev.unwrap().id, "ai-prompt");
        assert!(last.next.is_none());

        let unknown = index.prev_next("missing");
        assert_eq!(unknown, PrevNext::default());
    }

    #[test]
    fn test_prev_next_single_entry() {
        let index = CatalogIndex::build(
            CatalogKind::Components,
            vec![CatalogEntry::new("button", "Button")],
            &HashMap::new(),
        )
        .unwrap();

        let nav = index.prev_next("button");
        assert!(nav.prev.is_none());
        assert!(nav.next.is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let entries = vec![
            CatalogEntry::new("button", "Button"),
            CatalogEntry::new("button", "Another Button"),
        ];
        let err = CatalogIndex::build(CatalogKind::Components, entries, &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { ref id, .. } if id == "button"));
        assert!(err.to_string().contains("components"));
    }

    #[test]
    fn test_invalid_id_rejected() {
        let entries = vec![CatalogEntry::new("Not A Slug", "Broken")];
        let err = CatalogIndex::build(CatalogKind::Blocks, entries, &HashMap::new()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidId(_)));
    }

    #[test]
    fn test_uncategorized_block_rejected() {
        let entries = vec![CatalogEntry::new("sign-in-02", "Sign In")];
        let err = CatalogIndex::build(CatalogKind::Blocks, entries, &HashMap::new()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingCategory(ref id) if id == "sign-in-02"));
    }

    #[test]
    fn test_component_category_stripped_on_build() {
        let mut button = CatalogEntry::new("button", "Button");
        button.category = Some(Category::Ai);
        let index =
            CatalogIndex::build(CatalogKind::Components, vec![button], &HashMap::new()).unwrap();

        assert!(index.get_by_id("button").unwrap().category.is_none());
        assert!(index.get_by_category(Category::Ai).is_empty());
    }

    #[test]
    fn test_blank_snippet_does_not_count_as_usage() {
        let mut snippets = HashMap::new();
        snippets.insert(
            "separator".to_string(),
            EntrySnippets {
                description: Some(String::new()),
                usage_code: Some(String::new()),
                ..Default::default()
            },
        );
        let index = CatalogIndex::build(
            CatalogKind::Components,
            vec![CatalogEntry::new("separator", "Separator")],
            &snippets,
        )
        .unwrap();

        let separator = index.get_by_id("separator").unwrap();
        assert!(separator.description.is_none());
        assert!(separator.usage_code.is_none());
    }

    #[test]
    fn test_snippets_merged_by_id() {
        let snippets_yaml = r#"
snippets:
  sign-in:
    usage_code: "<SignIn />"
  unknown-block:
    usage_code: "<Nothing />"
"#;
        let entries = EntryFile::from_yaml(sample_blocks_yaml(), "test").unwrap();
        let snippets = SnippetFile::from_yaml(snippets_yaml, "test").unwrap();
        let index = CatalogIndex::from_files(CatalogKind::Blocks, entries, Some(snippets)).unwrap();

        assert_eq!(
            index.get_by_id("sign-in").unwrap().usage_code.as_deref(),
            Some("<SignIn />")
        );
        assert!(index.get_by_id("ai-chat").unwrap().usage_code.is_none());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_search() {
        let index = sample_blocks();

        let results = index.search("ai");
        assert_eq!(results.len(), 2);

        let results = index.search("CONVERSATIONAL");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "ai-chat");

        assert!(index.search("nonexistent").is_empty());
    }

    #[test]
    fn test_empty_table_is_valid() {
        let file = EntryFile::from_yaml("entries: []", "test").unwrap();
        let index = CatalogIndex::from_files(CatalogKind::Components, file, None).unwrap();
        assert!(index.is_empty());
        assert!(index.get_by_id("button").is_none());
        assert_eq!(index.prev_next("button"), PrevNext::default());
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = EntryFile::from_yaml("entries: [ { title: 3", "blocks.yaml").unwrap_err();
        assert!(err.to_string().contains("blocks.yaml"));
    }
}
