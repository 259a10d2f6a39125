//! The operation set interpreted by the serialization engine.
//!
//! Every record category declares two ordered instruction lists (one for the
//! record's own line(s), one for its immediate children) and the engine in
//! [`crate::emit`] interprets them generically. Adding a record category is a
//! matter of declaring new lists in [`crate::category`]; the engine never
//! branches on the category itself.

use serde::Serialize;

/// One step in a record category's emission recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Instruction {
    /// One `<level> <tag> <value>` line per scalar value held in `slot`;
    /// nothing at all when the slot is absent.
    Emit {
        tag: &'static str,
        slot: &'static str,
    },

    /// Like [`Instruction::Emit`], but the tag occupies a mandatory structural
    /// position: an absent slot still produces a bare `<level> <tag>` line
    /// (a place record with an unknown value still emits its place line).
    EmitRequired {
        tag: &'static str,
        slot: &'static str,
    },

    /// The record's identity line, `<level> @<xref>@ <tag>`. The xref comes
    /// from the node itself; a node reaching this instruction without one is
    /// refused outright rather than emitted malformed.
    EmitIdentified { tag: &'static str },

    /// Descend into each child record held in `slot`, in attachment order.
    /// Children render their own tags through their own instruction lists.
    Recurse { slot: &'static str },
}
