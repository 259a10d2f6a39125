//! Error types for transmission construction and serialization.

use crate::category::Category;

/// Errors surfaced while building or serializing a transmission.
///
/// Dangling cross-references are deliberately not represented here: they are
/// findings of the validation pass ([`crate::check`]), reported in batch and
/// never thrown.
#[derive(Debug, thiserror::Error)]
pub enum GedError {
    #[error("{category} record has no xref identifier for its identity line")]
    MissingIdentifier { category: Category },

    #[error("duplicate {category} xref @{xref}@: already registered")]
    DuplicateIdentifier { category: Category, xref: String },

    #[error("expected a {expected} record, found {found}")]
    UnexpectedCategory { expected: Category, found: Category },

    #[error("{0} records cannot be attached as level-0 transmission records")]
    NotTopLevel(Category),

    #[error("serialization error: {0}")]
    Serialization(String),
}
