//! The per-transmission cross-reference index.
//!
//! Scoped to one transmission: built while level-0 records are attached,
//! discarded with it, never shared. The index stores positions into the
//! owning transmission's category collections rather than references, so it
//! grants no ownership and cannot dangle while the transmission lives.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::GedError;

/// Maps `(category, xref)` to the record's position within its category's
/// level-0 collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrefIndex {
    entries: HashMap<Category, HashMap<String, usize>>,
}

impl XrefIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `xref` for `category` at `position`.
    ///
    /// First registration wins: a duplicate `(category, xref)` is refused
    /// with [`GedError::DuplicateIdentifier`] and the index is left intact.
    pub fn register(
        &mut self,
        category: Category,
        xref: &str,
        position: usize,
    ) -> Result<(), GedError> {
        let per_category = self.entries.entry(category).or_default();
        if per_category.contains_key(xref) {
            return Err(GedError::DuplicateIdentifier {
                category,
                xref: xref.to_owned(),
            });
        }
        per_category.insert(xref.to_owned(), position);
        Ok(())
    }

    /// Position of a registered record. Unknown keys are an ordinary miss,
    /// never an error; identifier validity is the validator's question.
    pub fn get(&self, category: Category, xref: &str) -> Option<usize> {
        self.entries
            .get(&category)
            .and_then(|per_category| per_category.get(xref))
            .copied()
    }

    pub fn contains(&self, category: Category, xref: &str) -> bool {
        self.get(category, xref).is_some()
    }

    /// Registered xrefs for one category, sorted.
    pub fn xrefs(&self, category: Category) -> Vec<&str> {
        let mut xrefs: Vec<&str> = self
            .entries
            .get(&category)
            .map(|per_category| per_category.keys().map(String::as_str).collect())
            .unwrap_or_default();
        xrefs.sort_unstable();
        xrefs
    }

    /// Number of registered xrefs for one category.
    pub fn count(&self, category: Category) -> usize {
        self.entries.get(&category).map_or(0, HashMap::len)
    }

    /// Registered identifier counts by category.
    pub fn summary(&self) -> IndexSummary {
        let mut summary = IndexSummary {
            submissions: self.count(Category::Submission),
            submitters: self.count(Category::Submitter),
            sources: self.count(Category::Source),
            repositories: self.count(Category::Repository),
            families: self.count(Category::Family),
            individuals: self.count(Category::Individual),
            multimedia: self.count(Category::Multimedia),
            notes: self.count(Category::Note),
            ..Default::default()
        };
        summary.total = summary.submissions
            + summary.submitters
            + summary.sources
            + summary.repositories
            + summary.families
            + summary.individuals
            + summary.multimedia
            + summary.notes;
        summary
    }
}

/// Counts of registered identifiers per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    pub submissions: usize,
    pub submitters: usize,
    pub sources: usize,
    pub repositories: usize,
    pub families: usize,
    pub individuals: usize,
    pub multimedia: usize,
    pub notes: usize,
    pub total: usize,
}

impl std::fmt::Display for IndexSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Submissions: {} | Submitters: {} | Sources: {} | Repositories: {} | \
             Families: {} | Individuals: {} | Multimedia: {} | Notes: {} | Total: {}",
            self.submissions,
            self.submitters,
            self.sources,
            self.repositories,
            self.families,
            self.individuals,
            self.multimedia,
            self.notes,
            self.total,
        )
    }
}
