//! Cross-reference validation: a read-only batch pass over a built
//! transmission.
//!
//! Dangling references are ordinary data in interchange practice: a tree
//! that holds them still serializes. The pass therefore collects findings
//! into a report instead of failing fast, and never mutates the tree.

use std::fmt;

use serde::Serialize;

use crate::category::Category;
use crate::error::GedError;
use crate::record::RecordNode;
use crate::transmission::Transmission;

/// One unresolved cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingRef {
    /// Category of the record holding the reference.
    pub category: Category,
    /// Xref of the holding record, when it has one.
    pub owner: Option<String>,
    /// Slot the identifier was read from.
    pub slot: &'static str,
    /// Category the reference should have resolved in.
    pub target: Category,
    /// The identifier that did not resolve.
    pub xref: String,
}

impl fmt::Display for DanglingRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        if let Some(ref owner) = self.owner {
            write!(f, " @{owner}@")?;
        }
        write!(
            f,
            " {}: @{}@ does not resolve to any {}",
            self.slot, self.xref, self.target
        )
    }
}

/// Batch report of unresolved references across a transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub failures: Vec<DanglingRef>,
}

impl CheckReport {
    /// Whether every walked reference resolved.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Machine-readable projection of the report.
    pub fn to_json(&self) -> Result<String, GedError> {
        serde_json::to_string_pretty(self).map_err(|e| GedError::Serialization(e.to_string()))
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Cross-reference check ===")?;
        writeln!(f, "{} dangling reference(s)", self.failures.len())?;
        for failure in &self.failures {
            writeln!(f, "[DANGLING] {failure}")?;
        }
        Ok(())
    }
}

impl Transmission {
    /// Walk every family and individual record's reference slots and confirm
    /// each identifier resolves in the index.
    ///
    /// A batch diagnostic, not a gate: the walk never stops at a failure and
    /// the tree is left untouched.
    pub fn self_check(&self) -> CheckReport {
        let mut report = CheckReport::default();
        for category in [Category::Family, Category::Individual] {
            for record in self.records(category) {
                check_record(self, record, &mut report);
            }
        }
        report
    }
}

fn check_record(transmission: &Transmission, record: &RecordNode, report: &mut CheckReport) {
    let category = record.category();
    for &(slot, target) in category.reference_slots() {
        for xref in record.values(slot) {
            if transmission.find(target, xref).is_none() {
                report.failures.push(DanglingRef {
                    category,
                    owner: record.identifier().map(str::to_owned),
                    slot,
                    target,
                    xref: xref.to_owned(),
                });
            }
        }
    }
}
