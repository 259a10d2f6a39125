//! The transmission aggregate: owns the record tree and its xref index.
//!
//! A transmission encapsulates one lineage-linked interchange unit: a
//! mandatory header and trailer enclosing any number of level-0 data
//! records, grouped by category. The index is built incrementally as records
//! are attached and lives and dies with the transmission.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::emit::{emit, Line};
use crate::error::GedError;
use crate::index::{IndexSummary, XrefIndex};
use crate::record::RecordNode;

/// Output order of the level-0 collections between header and trailer. This
/// grouping is part of the interchange contract, not a presentation choice.
pub const RECORD_ORDER: [Category; 8] = [
    Category::Submission,
    Category::Submitter,
    Category::Source,
    Category::Repository,
    Category::Family,
    Category::Individual,
    Category::Multimedia,
    Category::Note,
];

/// One lineage-linked transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transmission {
    header: RecordNode,
    trailer: RecordNode,
    records: HashMap<Category, Vec<RecordNode>>,
    index: XrefIndex,
}

impl Transmission {
    /// Build a transmission around its mandatory header and trailer records.
    pub fn new(header: RecordNode, trailer: RecordNode) -> Result<Self, GedError> {
        if header.category() != Category::Header {
            return Err(GedError::UnexpectedCategory {
                expected: Category::Header,
                found: header.category(),
            });
        }
        if trailer.category() != Category::Trailer {
            return Err(GedError::UnexpectedCategory {
                expected: Category::Trailer,
                found: trailer.category(),
            });
        }
        Ok(Self {
            header,
            trailer,
            records: HashMap::new(),
            index: XrefIndex::new(),
        })
    }

    pub fn header(&self) -> &RecordNode {
        &self.header
    }

    pub fn trailer(&self) -> &RecordNode {
        &self.trailer
    }

    /// Attach a level-0 record, registering its xref in the index the moment
    /// it joins the transmission.
    ///
    /// A record whose `(category, xref)` is already registered is refused and
    /// not attached; the first registration stays authoritative. Records of
    /// nested-only categories (and additional headers or trailers) are
    /// refused outright.
    pub fn add_record(&mut self, record: RecordNode) -> Result<(), GedError> {
        let category = record.category();
        if !RECORD_ORDER.contains(&category) {
            return Err(GedError::NotTopLevel(category));
        }
        if category.has_xref() {
            if let Some(xref) = record.identifier() {
                let position = self.records(category).len();
                self.index.register(category, xref, position)?;
            }
        }
        self.records.entry(category).or_default().push(record);
        Ok(())
    }

    /// Level-0 records of one category, in attachment order.
    pub fn records(&self, category: Category) -> &[RecordNode] {
        self.records.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Resolve an xref within a category. Absence is an ordinary miss;
    /// whether a miss is a problem is the validation pass's question.
    pub fn find(&self, category: Category, xref: &str) -> Option<&RecordNode> {
        let position = self.index.get(category, xref)?;
        self.records(category).get(position)
    }

    pub fn index(&self) -> &XrefIndex {
        &self.index
    }

    /// Registered identifier counts by category.
    pub fn index_summary(&self) -> IndexSummary {
        self.index.summary()
    }

    /// Render the whole transmission: header first, then each category's
    /// records in [`RECORD_ORDER`], trailer last, everything at level 0.
    pub fn serialize(&self) -> Result<Vec<Line>, GedError> {
        let mut lines = emit(&self.header, 0)?;
        for category in RECORD_ORDER {
            for record in self.records(category) {
                lines.extend(emit(record, 0)?);
            }
        }
        lines.extend(emit(&self.trailer, 0)?);
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> Transmission {
        let header = RecordNode::new(Category::Header)
            .with_scalar("source_system", "GEDLINK")
            .with_scalar("character_set", "UTF-8");
        Transmission::new(header, RecordNode::new(Category::Trailer)).unwrap()
    }

    fn lines(transmission: &Transmission) -> Vec<String> {
        transmission
            .serialize()
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn new_checks_header_and_trailer_categories() {
        let err = Transmission::new(
            RecordNode::new(Category::Trailer),
            RecordNode::new(Category::Trailer),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GedError::UnexpectedCategory {
                expected: Category::Header,
                ..
            }
        ));

        let err = Transmission::new(
            RecordNode::new(Category::Header),
            RecordNode::new(Category::Note),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GedError::UnexpectedCategory {
                expected: Category::Trailer,
                ..
            }
        ));
    }

    #[test]
    fn empty_transmission_is_header_and_trailer() {
        assert_eq!(
            lines(&minimal()),
            vec!["0 HEAD", "1 SOUR GEDLINK", "1 CHAR UTF-8", "0 TRLR"]
        );
    }

    #[test]
    fn add_and_find() {
        let mut transmission = minimal();
        transmission
            .add_record(
                RecordNode::new(Category::Individual)
                    .with_identifier("I1")
                    .with_scalar("name", "Sarah /Burrowes/"),
            )
            .unwrap();

        let found = transmission.find(Category::Individual, "I1").unwrap();
        assert_eq!(found.scalar("name"), Some("Sarah /Burrowes/"));
        assert!(transmission.find(Category::Individual, "I2").is_none());
        assert!(transmission.find(Category::Family, "I1").is_none());
    }

    #[test]
    fn unidentified_record_is_kept_but_unindexed() {
        // The attachment itself succeeds; emission is where the missing
        // identity becomes fatal.
        let mut transmission = minimal();
        transmission
            .add_record(RecordNode::new(Category::Note).with_scalar("text", "orphan"))
            .unwrap();
        assert_eq!(transmission.records(Category::Note).len(), 1);
        assert_eq!(transmission.index_summary().notes, 0);
        assert!(transmission.serialize().is_err());
    }

    #[test]
    fn duplicate_xref_is_refused_and_not_attached() {
        let mut transmission = minimal();
        transmission
            .add_record(
                RecordNode::new(Category::Submitter)
                    .with_identifier("U1")
                    .with_scalar("name", "first"),
            )
            .unwrap();

        let err = transmission
            .add_record(
                RecordNode::new(Category::Submitter)
                    .with_identifier("U1")
                    .with_scalar("name", "second"),
            )
            .unwrap_err();
        assert!(matches!(err, GedError::DuplicateIdentifier { .. }));

        assert_eq!(transmission.records(Category::Submitter).len(), 1);
        let kept = transmission.find(Category::Submitter, "U1").unwrap();
        assert_eq!(kept.scalar("name"), Some("first"));
    }

    #[test]
    fn nested_categories_are_refused_at_top_level() {
        let mut transmission = minimal();
        for category in [Category::Place, Category::Address, Category::Event] {
            let err = transmission
                .add_record(RecordNode::new(category))
                .unwrap_err();
            assert!(matches!(err, GedError::NotTopLevel(c) if c == category));
        }
        // so are additional headers and trailers
        assert!(transmission
            .add_record(RecordNode::new(Category::Header))
            .is_err());
        assert!(transmission
            .add_record(RecordNode::new(Category::Trailer))
            .is_err());
    }

    #[test]
    fn serialization_groups_categories_in_fixed_order() {
        let mut transmission = minimal();
        // attach deliberately out of output order
        transmission
            .add_record(RecordNode::new(Category::Note).with_identifier("N1"))
            .unwrap();
        transmission
            .add_record(RecordNode::new(Category::Individual).with_identifier("I1"))
            .unwrap();
        transmission
            .add_record(
                RecordNode::new(Category::Submitter)
                    .with_identifier("U1")
                    .with_scalar("name", "Rob"),
            )
            .unwrap();
        transmission
            .add_record(RecordNode::new(Category::Family).with_identifier("F1"))
            .unwrap();

        let level0: Vec<String> = transmission
            .serialize()
            .unwrap()
            .iter()
            .filter(|line| line.level == 0)
            .map(|line| line.tag.to_owned())
            .collect();
        assert_eq!(level0, vec!["HEAD", "SUBM", "FAM", "INDI", "NOTE", "TRLR"]);
    }

    #[test]
    fn records_of_one_category_keep_attachment_order() {
        let mut transmission = minimal();
        for xref in ["I2", "I1", "I3"] {
            transmission
                .add_record(RecordNode::new(Category::Individual).with_identifier(xref))
                .unwrap();
        }
        let xrefs: Vec<&str> = transmission
            .records(Category::Individual)
            .iter()
            .filter_map(RecordNode::identifier)
            .collect();
        assert_eq!(xrefs, vec!["I2", "I1", "I3"]);
    }

    #[test]
    fn index_summary_tracks_registrations() {
        let mut transmission = minimal();
        transmission
            .add_record(RecordNode::new(Category::Individual).with_identifier("I1"))
            .unwrap();
        transmission
            .add_record(RecordNode::new(Category::Individual).with_identifier("I2"))
            .unwrap();

        let summary = transmission.index_summary();
        assert_eq!(summary.individuals, 2);
        assert_eq!(summary.total, 2);
        assert_eq!(transmission.index().xrefs(Category::Individual), vec!["I1", "I2"]);
    }
}
