//! The closed record-category enumeration and its per-category schema tables.
//!
//! A category fixes a record's interchange tag, whether it carries an xref
//! identifier, its emission instruction lists, and which of its scalar slots
//! hold cross-references (and into which category those resolve). All of this
//! is static table data; the engine and validator stay generic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::instruction::Instruction;
use crate::instruction::Instruction::{Emit, EmitIdentified, EmitRequired, Recurse};

/// The kind of a record in a transmission tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    // Level-0 records, in transmission output order
    Header,
    Submission,
    Submitter,
    Source,
    Repository,
    Family,
    Individual,
    Multimedia,
    Note,
    Trailer,

    // Nested sub-records
    Event,
    Place,
    Address,
}

impl Category {
    /// Every category, level-0 kinds first in output order.
    pub const ALL: [Category; 13] = [
        Category::Header,
        Category::Submission,
        Category::Submitter,
        Category::Source,
        Category::Repository,
        Category::Family,
        Category::Individual,
        Category::Multimedia,
        Category::Note,
        Category::Trailer,
        Category::Event,
        Category::Place,
        Category::Address,
    ];

    /// The interchange tag emitted on this category's own line.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Header => "HEAD",
            Category::Submission => "SUBN",
            Category::Submitter => "SUBM",
            Category::Source => "SOUR",
            Category::Repository => "REPO",
            Category::Family => "FAM",
            Category::Individual => "INDI",
            Category::Multimedia => "OBJE",
            Category::Note => "NOTE",
            Category::Trailer => "TRLR",
            Category::Event => "EVEN",
            Category::Place => "PLAC",
            Category::Address => "ADDR",
        }
    }

    /// Whether records of this category carry an xref identifier that other
    /// records may reference.
    pub fn has_xref(self) -> bool {
        matches!(
            self,
            Category::Submission
                | Category::Submitter
                | Category::Source
                | Category::Repository
                | Category::Family
                | Category::Individual
                | Category::Multimedia
                | Category::Note
        )
    }

    /// Whether this category appears at level 0 of a transmission.
    pub fn is_top_level(self) -> bool {
        !matches!(self, Category::Event | Category::Place | Category::Address)
    }

    /// Instructions for the record's own line(s), interpreted at the record's
    /// level.
    pub fn own_instructions(self) -> &'static [Instruction] {
        match self {
            Category::Header => HEADER_OWN,
            Category::Submission => SUBMISSION_OWN,
            Category::Submitter => SUBMITTER_OWN,
            Category::Source => SOURCE_OWN,
            Category::Repository => REPOSITORY_OWN,
            Category::Family => FAMILY_OWN,
            Category::Individual => INDIVIDUAL_OWN,
            Category::Multimedia => MULTIMEDIA_OWN,
            Category::Note => NOTE_OWN,
            Category::Trailer => TRAILER_OWN,
            Category::Event => EVENT_OWN,
            Category::Place => PLACE_OWN,
            Category::Address => ADDRESS_OWN,
        }
    }

    /// Instructions for the record's immediate children, interpreted one
    /// level deeper.
    pub fn child_instructions(self) -> &'static [Instruction] {
        match self {
            Category::Header => HEADER_CHILD,
            Category::Submission => SUBMISSION_CHILD,
            Category::Submitter => SUBMITTER_CHILD,
            Category::Source => SOURCE_CHILD,
            Category::Repository => REPOSITORY_CHILD,
            Category::Family => FAMILY_CHILD,
            Category::Individual => INDIVIDUAL_CHILD,
            Category::Multimedia => MULTIMEDIA_CHILD,
            Category::Note => NOTE_CHILD,
            Category::Trailer => NO_INSTRUCTIONS,
            Category::Event => EVENT_CHILD,
            Category::Place => PLACE_CHILD,
            Category::Address => ADDRESS_CHILD,
        }
    }

    /// Scalar slots of this category that hold xref strings, paired with the
    /// category the reference resolves in. Drives `@…@` wrapping on emission
    /// and the validator's walk.
    pub fn reference_slots(self) -> &'static [(&'static str, Category)] {
        match self {
            Category::Header => HEADER_REFS,
            Category::Submission => SUBMISSION_REFS,
            Category::Submitter => SUBMITTER_REFS,
            Category::Source => SOURCE_REFS,
            Category::Repository => REPOSITORY_REFS,
            Category::Family => FAMILY_REFS,
            Category::Individual => INDIVIDUAL_REFS,
            Category::Multimedia => MULTIMEDIA_REFS,
            Category::Note => NOTE_REFS,
            Category::Event => EVENT_REFS,
            Category::Place => PLACE_REFS,
            Category::Trailer | Category::Address => NO_REFS,
        }
    }

    /// The category `slot` resolves into, if `slot` is a reference slot.
    pub fn reference_target(self, slot: &str) -> Option<Category> {
        self.reference_slots()
            .iter()
            .find(|(name, _)| *name == slot)
            .map(|(_, target)| *target)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Header => "header",
            Category::Submission => "submission",
            Category::Submitter => "submitter",
            Category::Source => "source",
            Category::Repository => "repository",
            Category::Family => "family",
            Category::Individual => "individual",
            Category::Multimedia => "multimedia",
            Category::Note => "note",
            Category::Trailer => "trailer",
            Category::Event => "event",
            Category::Place => "place",
            Category::Address => "address",
        };
        write!(f, "{name}")
    }
}

const NO_INSTRUCTIONS: &[Instruction] = &[];
const NO_REFS: &[(&str, Category)] = &[];

const HEADER_OWN: &[Instruction] = &[EmitRequired { tag: "HEAD", slot: "value" }];
const HEADER_CHILD: &[Instruction] = &[
    Emit { tag: "SOUR", slot: "source_system" },
    Emit { tag: "DEST", slot: "destination" },
    Emit { tag: "DATE", slot: "transmission_date" },
    Emit { tag: "SUBM", slot: "submitter_ref" },
    Emit { tag: "FILE", slot: "file_name" },
    EmitRequired { tag: "CHAR", slot: "character_set" },
    Emit { tag: "LANG", slot: "language" },
];
const HEADER_REFS: &[(&str, Category)] = &[("submitter_ref", Category::Submitter)];

const SUBMISSION_OWN: &[Instruction] = &[EmitIdentified { tag: "SUBN" }];
const SUBMISSION_CHILD: &[Instruction] = &[
    Emit { tag: "SUBM", slot: "submitter_ref" },
    Emit { tag: "FAMF", slot: "family_file" },
    Emit { tag: "TEMP", slot: "temple_code" },
    Emit { tag: "ANCE", slot: "ancestor_generations" },
    Emit { tag: "DESC", slot: "descendant_generations" },
];
const SUBMISSION_REFS: &[(&str, Category)] = &[("submitter_ref", Category::Submitter)];

const SUBMITTER_OWN: &[Instruction] = &[EmitIdentified { tag: "SUBM" }];
const SUBMITTER_CHILD: &[Instruction] = &[
    EmitRequired { tag: "NAME", slot: "name" },
    Recurse { slot: "address" },
    Emit { tag: "PHON", slot: "phone" },
    Emit { tag: "EMAIL", slot: "email" },
    Emit { tag: "FAX", slot: "fax" },
    Emit { tag: "WWW", slot: "web_page" },
    Emit { tag: "LANG", slot: "language" },
    Emit { tag: "OBJE", slot: "multimedia_refs" },
    Emit { tag: "NOTE", slot: "note_refs" },
    Emit { tag: "RFN", slot: "registered_rfn" },
    Emit { tag: "RIN", slot: "record_id" },
];
const SUBMITTER_REFS: &[(&str, Category)] = &[
    ("multimedia_refs", Category::Multimedia),
    ("note_refs", Category::Note),
];

const SOURCE_OWN: &[Instruction] = &[EmitIdentified { tag: "SOUR" }];
const SOURCE_CHILD: &[Instruction] = &[
    Emit { tag: "TITL", slot: "title" },
    Emit { tag: "AUTH", slot: "author" },
    Emit { tag: "ABBR", slot: "short_title" },
    Emit { tag: "PUBL", slot: "publication" },
    Emit { tag: "TEXT", slot: "text" },
    Emit { tag: "REPO", slot: "repository_ref" },
    Emit { tag: "NOTE", slot: "note_refs" },
    Emit { tag: "RIN", slot: "record_id" },
];
const SOURCE_REFS: &[(&str, Category)] = &[
    ("repository_ref", Category::Repository),
    ("note_refs", Category::Note),
];

const REPOSITORY_OWN: &[Instruction] = &[EmitIdentified { tag: "REPO" }];
const REPOSITORY_CHILD: &[Instruction] = &[
    EmitRequired { tag: "NAME", slot: "name" },
    Recurse { slot: "address" },
    Emit { tag: "PHON", slot: "phone" },
    Emit { tag: "NOTE", slot: "note_refs" },
    Emit { tag: "RIN", slot: "record_id" },
];
const REPOSITORY_REFS: &[(&str, Category)] = &[("note_refs", Category::Note)];

const FAMILY_OWN: &[Instruction] = &[EmitIdentified { tag: "FAM" }];
const FAMILY_CHILD: &[Instruction] = &[
    Emit { tag: "HUSB", slot: "husband_ref" },
    Emit { tag: "WIFE", slot: "wife_ref" },
    Emit { tag: "CHIL", slot: "child_refs" },
    Recurse { slot: "events" },
    Emit { tag: "NCHI", slot: "child_count" },
    Emit { tag: "SUBM", slot: "submitter_refs" },
    Emit { tag: "OBJE", slot: "multimedia_refs" },
    Emit { tag: "NOTE", slot: "note_refs" },
    Emit { tag: "SOUR", slot: "source_refs" },
    Emit { tag: "RIN", slot: "record_id" },
];
const FAMILY_REFS: &[(&str, Category)] = &[
    ("husband_ref", Category::Individual),
    ("wife_ref", Category::Individual),
    ("child_refs", Category::Individual),
    ("submitter_refs", Category::Submitter),
    ("multimedia_refs", Category::Multimedia),
    ("note_refs", Category::Note),
    ("source_refs", Category::Source),
];

const INDIVIDUAL_OWN: &[Instruction] = &[EmitIdentified { tag: "INDI" }];
const INDIVIDUAL_CHILD: &[Instruction] = &[
    Emit { tag: "NAME", slot: "name" },
    Emit { tag: "SEX", slot: "sex" },
    Recurse { slot: "events" },
    Emit { tag: "FAMS", slot: "spouse_family_refs" },
    Emit { tag: "FAMC", slot: "child_family_refs" },
    Emit { tag: "ASSO", slot: "association_refs" },
    Emit { tag: "SUBM", slot: "submitter_refs" },
    Emit { tag: "OBJE", slot: "multimedia_refs" },
    Emit { tag: "NOTE", slot: "note_refs" },
    Emit { tag: "SOUR", slot: "source_refs" },
    Emit { tag: "RIN", slot: "record_id" },
];
const INDIVIDUAL_REFS: &[(&str, Category)] = &[
    ("spouse_family_refs", Category::Family),
    ("child_family_refs", Category::Family),
    ("association_refs", Category::Individual),
    ("submitter_refs", Category::Submitter),
    ("multimedia_refs", Category::Multimedia),
    ("note_refs", Category::Note),
    ("source_refs", Category::Source),
];

const MULTIMEDIA_OWN: &[Instruction] = &[EmitIdentified { tag: "OBJE" }];
const MULTIMEDIA_CHILD: &[Instruction] = &[
    EmitRequired { tag: "FORM", slot: "format" },
    Emit { tag: "TITL", slot: "title" },
    Emit { tag: "FILE", slot: "file_name" },
    Emit { tag: "NOTE", slot: "note_refs" },
    Emit { tag: "RIN", slot: "record_id" },
];
const MULTIMEDIA_REFS: &[(&str, Category)] = &[("note_refs", Category::Note)];

const NOTE_OWN: &[Instruction] = &[EmitIdentified { tag: "NOTE" }];
const NOTE_CHILD: &[Instruction] = &[
    Emit { tag: "CONT", slot: "text" },
    Emit { tag: "SOUR", slot: "source_refs" },
    Emit { tag: "RIN", slot: "record_id" },
];
const NOTE_REFS: &[(&str, Category)] = &[("source_refs", Category::Source)];

const TRAILER_OWN: &[Instruction] = &[EmitRequired { tag: "TRLR", slot: "value" }];

const EVENT_OWN: &[Instruction] = &[EmitRequired { tag: "EVEN", slot: "value" }];
const EVENT_CHILD: &[Instruction] = &[
    Emit { tag: "TYPE", slot: "event_type" },
    Emit { tag: "DATE", slot: "date" },
    Recurse { slot: "place" },
    Recurse { slot: "address" },
    Emit { tag: "NOTE", slot: "note_refs" },
    Emit { tag: "SOUR", slot: "source_refs" },
];
const EVENT_REFS: &[(&str, Category)] = &[
    ("note_refs", Category::Note),
    ("source_refs", Category::Source),
];

const PLACE_OWN: &[Instruction] = &[EmitRequired { tag: "PLAC", slot: "place_value" }];
const PLACE_CHILD: &[Instruction] = &[
    Emit { tag: "FORM", slot: "place_hierarchy" },
    Emit { tag: "SOUR", slot: "source_refs" },
    Emit { tag: "NOTE", slot: "note_refs" },
];
const PLACE_REFS: &[(&str, Category)] = &[
    ("source_refs", Category::Source),
    ("note_refs", Category::Note),
];

const ADDRESS_OWN: &[Instruction] = &[EmitRequired { tag: "ADDR", slot: "address_line" }];
const ADDRESS_CHILD: &[Instruction] = &[
    Emit { tag: "ADR1", slot: "address_line1" },
    Emit { tag: "ADR2", slot: "address_line2" },
    Emit { tag: "CITY", slot: "city" },
    Emit { tag: "STAE", slot: "state" },
    Emit { tag: "POST", slot: "postal_code" },
    Emit { tag: "CTRY", slot: "country" },
];
