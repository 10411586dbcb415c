//! Frontmatter types and data structures.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

/// Represents parsed YAML frontmatter from a markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Fields as key-value pairs.
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

impl Frontmatter {
    /// Collect every scalar string that appears as an item of a sequence
    /// value, in either block-list or inline-array form. These are the only
    /// front-matter shapes that can carry links.
    pub fn sequence_strings(&self) -> Vec<&str> {
        let mut items = Vec::new();
        for value in self.fields.values() {
            if let Some(seq) = value.as_sequence() {
                for item in seq {
                    if let Some(s) = item.as_str() {
                        items.push(s);
                    }
                }
            }
        }
        items
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}
