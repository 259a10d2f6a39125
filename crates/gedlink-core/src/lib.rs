//! Lineage-linked transmission model: a tree of typed genealogy records, an
//! instruction-driven engine that renders it to the line-oriented interchange
//! format, and a per-transmission cross-reference index.
//!
//! The moving parts are deliberately few. A [`RecordNode`] is passive data: a
//! category, an optional xref identifier, and named attribute slots. Each
//! [`Category`] declares two ordered [`Instruction`] lists, how to emit the
//! record's own line(s) and its children, and one engine ([`emit`])
//! interprets them for every category alike, so adding a record kind is
//! schema data, not engine logic. Cross-record relationships (a family's
//! spouse, a header's submitter) are plain identifier strings, never owning
//! links; the [`Transmission`] resolves them through its [`XrefIndex`], and
//! [`Transmission::self_check`] reports the ones that fail to resolve.
//!
//! Populating trees from source text, wrapping over-length values, and any
//! file I/O are left to the surrounding tooling: this crate consumes built
//! record trees and produces [`Line`] sequences.

pub mod category;
pub mod check;
pub mod emit;
pub mod error;
pub mod index;
pub mod instruction;
pub mod record;
pub mod transmission;

pub use category::Category;
pub use check::{CheckReport, DanglingRef};
pub use emit::{emit, Line};
pub use error::GedError;
pub use index::{IndexSummary, XrefIndex};
pub use instruction::Instruction;
pub use record::{RecordNode, Slot};
pub use transmission::{Transmission, RECORD_ORDER};
