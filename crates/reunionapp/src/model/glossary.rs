//! Reference glossary of association terms.

use super::{Collection, Record, Stored};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTerm {
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_terms: Vec<String>,
}

// Glossary entries are listed in fetch order and carry no order key.
impl Record for GlossaryTerm {
    const COLLECTION: Collection = Collection::Glossary;
}

/// Search and category filter for the glossary view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryFilter {
    pub query: String,
    pub category: Option<String>,
}

impl GlossaryFilter {
    pub fn new(query: impl Into<String>, category: Option<String>) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }

    /// Substring match on term, description or reading, plus exact category.
    pub fn matches(&self, term: &GlossaryTerm) -> bool {
        let q = self.query.as_str();
        let matches_search = q.is_empty()
            || term.term.contains(q)
            || term.description.contains(q)
            || term.reading.as_deref().is_some_and(|r| r.contains(q));

        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|c| term.category == c);

        matches_search && matches_category
    }

    pub fn apply(&self, terms: &[Stored<GlossaryTerm>]) -> Vec<Stored<GlossaryTerm>> {
        terms
            .iter()
            .filter(|t| self.matches(&t.record))
            .cloned()
            .collect()
    }
}

/// Distinct categories, in the order they first appear.
pub fn categories(terms: &[Stored<GlossaryTerm>]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for t in terms {
        if !seen.contains(&t.record.category) {
            seen.push(t.record.category.clone());
        }
    }
    seen
}
