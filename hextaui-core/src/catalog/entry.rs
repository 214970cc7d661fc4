//! Catalog entry records
//!
//! A `CatalogEntry` describes one component or block: its slug, display
//! name, usage snippets and reference links. Entries are assembled from a
//! base definition and an optional `EntrySnippets` override keyed by the
//! same id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CatalogError;

/// The two catalogs served by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Components,
    Blocks,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Components, CatalogKind::Blocks];

    /// URL path segment (`components` or `blocks`)
    pub fn segment(&self) -> &'static str {
        match self {
            CatalogKind::Components => "components",
            CatalogKind::Blocks => "blocks",
        }
    }

    /// Singular label used in generated documents and error messages
    pub fn label(&self) -> &'static str {
        match self {
            CatalogKind::Components => "Component",
            CatalogKind::Blocks => "Block",
        }
    }

    /// Whether the table is re-ordered alphabetically by title
    pub(crate) fn sorts_by_title(&self) -> bool {
        matches!(self, CatalogKind::Components)
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for CatalogKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "components" | "component" => Ok(CatalogKind::Components),
            "blocks" | "block" => Ok(CatalogKind::Blocks),
            other => Err(CatalogError::UnknownKind(other.to_string())),
        }
    }
}

/// Block category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ai,
    Auth,
    Billing,
    Settings,
    Team,
    Tasks,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ai,
        Category::Auth,
        Category::Billing,
        Category::Settings,
        Category::Team,
        Category::Tasks,
    ];

    /// Machine name, as written in data files and query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ai => "ai",
            Category::Auth => "auth",
            Category::Billing => "billing",
            Category::Settings => "settings",
            Category::Team => "team",
            Category::Tasks => "tasks",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::Auth => "Authentication",
            Category::Billing => "Billing",
            Category::Settings => "Settings",
            Category::Team => "Team",
            Category::Tasks => "Tasks",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// A single catalog entry (one component or block)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// URL slug and lookup key
    pub id: String,

    /// Display name
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Blocks carry a category, components do not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Name of the renderable implementation in the presentation layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_imports: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_code: Option<String>,

    /// Replaces the default install command when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_ref: Option<String>,
}

/// Per-entry overrides merged over a base entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySnippets {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage_imports: Option<String>,
    #[serde(default)]
    pub usage_code: Option<String>,
    #[serde(default)]
    pub install_code: Option<String>,
    #[serde(default)]
    pub api_ref: Option<String>,
    #[serde(default)]
    pub docs_ref: Option<String>,
}

impl CatalogEntry {
    /// Create a bare entry with only an id and title
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category: None,
            component: None,
            usage_imports: None,
            usage_code: None,
            install_code: None,
            api_ref: None,
            docs_ref: None,
        }
    }

    /// Apply snippet overrides. A snippet field replaces the base value only
    /// when it is present.
    pub fn merge_snippets(mut self, snippets: &EntrySnippets) -> Self {
        fn take(base: &mut Option<String>, over: &Option<String>) {
            if let Some(value) = over {
                *base = Some(value.clone());
            }
        }

        take(&mut self.description, &snippets.description);
        take(&mut self.usage_imports, &snippets.usage_imports);
        take(&mut self.usage_code, &snippets.usage_code);
        take(&mut self.install_code, &snippets.install_code);
        take(&mut self.api_ref, &snippets.api_ref);
        take(&mut self.docs_ref, &snippets.docs_ref);
        self
    }

    /// Drop optional text fields that hold only whitespace
    pub fn without_blank_fields(mut self) -> Self {
        for field in [
            &mut self.description,
            &mut self.component,
            &mut self.usage_imports,
            &mut self.usage_code,
            &mut self.install_code,
            &mut self.api_ref,
            &mut self.docs_ref,
        ] {
            if non_blank(field).is_none() {
                *field = None;
            }
        }
        self
    }

    /// Apply the category rule for `kind`: blocks must carry one, components
    /// never do.
    pub fn checked_category(mut self, kind: CatalogKind) -> Result<Self, CatalogError> {
        match (kind, self.category) {
            (CatalogKind::Blocks, None) => return Err(CatalogError::MissingCategory(self.id)),
            (CatalogKind::Components, Some(category)) => {
                tracing::warn!(
                    "Ignoring category '{}' on component '{}'",
                    category.as_str(),
                    self.id
                );
                self.category = None;
            }
            _ => {}
        }
        Ok(self)
    }

    /// Check the id and title before the entry goes into a table
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !is_valid_slug(&self.id) {
            return Err(CatalogError::InvalidId(self.id.clone()));
        }

        if self.title.trim().is_empty() {
            return Err(CatalogError::MissingTitle(self.id.clone()));
        }

        Ok(())
    }

    /// First line of the description, or an empty string
    pub fn short_description(&self) -> &str {
        self.description
            .as_deref()
            .and_then(|d| d.lines().next())
            .unwrap_or("")
            .trim()
    }

    pub fn has_usage(&self) -> bool {
        non_blank(&self.usage_imports).is_some() || non_blank(&self.usage_code).is_some()
    }

    pub fn has_links(&self) -> bool {
        non_blank(&self.docs_ref).is_some() || non_blank(&self.api_ref).is_some()
    }
}

/// The field's text, unless it is missing or blank
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Lowercase alphanumeric with single hyphens, no leading or trailing hyphen
pub fn is_valid_slug(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !id.starts_with('-')
        && !id.ends_with('-')
        && !id.contains("--")
}

#[cfg(test)]
mod entry_tests {
    use super::*;

    #[test]
    fn test_snippet_fields_override_when_present() {
        let mut base = CatalogEntry::new("button", "Button");
        base.description = Some("Base description".to_string());
        base.docs_ref = Some("https://example.com/base".to_string());

        let snippets = EntrySnippets {
            description: Some("Snippet description".to_string()),
            usage_code: Some("<Button />".to_string()),
            ..Default::default()
        };

        let merged = base.merge_snippets(&snippets);
        assert_eq!(merged.description.as_deref(), Some("Snippet description"));
        assert_eq!(merged.usage_code.as_deref(), Some("<Button />"));
        // Absent snippet fields keep the base value
        assert_eq!(merged.docs_ref.as_deref(), Some("https://example.com/base"));
        assert!(merged.usage_imports.is_none());
    }

    #[test]
    fn test_omitted_snippet_key_keeps_base() {
        let yaml = "usage_code: \"<Card />\"\n";
        let snippets: EntrySnippets = serde_yaml_ng::from_str(yaml).unwrap();

        let mut base = CatalogEntry::new("card", "Card");
        base.install_code = Some("npx custom card".to_string());

        let merged = base.merge_snippets(&snippets);
        assert_eq!(merged.install_code.as_deref(), Some("npx custom card"));
        assert_eq!(merged.usage_code.as_deref(), Some("<Card />"));
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("button"));
        assert!(is_valid_slug("ai-chat-01"));

        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Button"));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("path/segment"));
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let entry = CatalogEntry::new("badge", "   ");
        let err = entry.validate().unwrap_err();
        assert!(matches!(err, CatalogError::MissingTitle(id) if id == "badge"));
    }

    #[test]
    fn test_blank_fields_dropped() {
        let mut entry = CatalogEntry::new("separator", "Separator");
        entry.description = Some(String::new());
        entry.usage_code = Some("  \n".to_string());
        entry.docs_ref = Some("https://example.com/docs".to_string());

        let entry = entry.without_blank_fields();
        assert!(entry.description.is_none());
        assert!(entry.usage_code.is_none());
        assert!(!entry.has_usage());
        assert!(entry.has_links());
    }

    #[test]
    fn test_blank_snippet_reads_as_absent() {
        let mut entry = CatalogEntry::new("kbd", "Kbd");
        entry.usage_imports = Some(" ".to_string());
        assert!(!entry.has_usage());
        assert_eq!(non_blank(&entry.usage_imports), None);
    }

    #[test]
    fn test_block_requires_category() {
        let err = CatalogEntry::new("sign-in-02", "Sign In")
            .checked_category(CatalogKind::Blocks)
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingCategory(ref id) if id == "sign-in-02"));

        let mut block = CatalogEntry::new("sign-in-02", "Sign In");
        block.category = Some(Category::Auth);
        let block = block.checked_category(CatalogKind::Blocks).unwrap();
        assert_eq!(block.category, Some(Category::Auth));
    }

    #[test]
    fn test_component_category_cleared() {
        let mut component = CatalogEntry::new("button", "Button");
        component.category = Some(Category::Ai);
        let component = component.checked_category(CatalogKind::Components).unwrap();
        assert!(component.category.is_none());
    }

    #[test]
    fn test_category_parsing_and_labels() {
        assert_eq!("auth".parse::<Category>().unwrap(), Category::Auth);
        assert_eq!(" AI ".parse::<Category>().unwrap(), Category::Ai);
        assert_eq!(Category::Auth.label(), "Authentication");
        assert!("marketing".parse::<Category>().is_err());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("blocks".parse::<CatalogKind>().unwrap(), CatalogKind::Blocks);
        assert_eq!(
            "component".parse::<CatalogKind>().unwrap(),
            CatalogKind::Components
        );
        assert!("widgets".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_short_description() {
        let mut entry = CatalogEntry::new("tabs", "Tabs");
        assert_eq!(entry.short_description(), "");

        entry.description = Some("First line\nSecond line".to_string());
        assert_eq!(entry.short_description(), "First line");
    }
}
