//! Record nodes: the passive data units of a transmission tree.
//!
//! A node holds a category, an optional xref identifier, and named attribute
//! slots. It performs no I/O and makes no emission decisions of its own; the
//! engine in [`crate::emit`] interprets the category's instruction lists
//! against it. Child records are owned exclusively through their slot, so the
//! ownership graph is always a tree; relationships between level-0 records
//! are plain identifier strings resolved through the transmission index.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// One attribute slot of a record node. Absence is the absence of the map
/// entry, not a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// A single scalar value.
    Scalar(String),
    /// An ordered sequence of scalar values (repeatable tags).
    List(Vec<String>),
    /// A single owned child record.
    Record(Box<RecordNode>),
    /// An ordered sequence of owned child records.
    Records(Vec<RecordNode>),
}

/// One structural unit of a transmission tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordNode {
    category: Category,
    identifier: Option<String>,
    slots: BTreeMap<String, Slot>,
}

impl RecordNode {
    /// Create an empty record of the given category.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            identifier: None,
            slots: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The record's xref identifier, if one has been assigned.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn set_identifier(&mut self, xref: impl Into<String>) {
        self.identifier = Some(xref.into());
    }

    /// Assign the xref identifier.
    pub fn with_identifier(mut self, xref: impl Into<String>) -> Self {
        self.set_identifier(xref);
        self
    }

    /// Set a scalar slot.
    pub fn with_scalar(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_scalar(slot, value);
        self
    }

    /// Attach a child record.
    pub fn with_child(mut self, slot: impl Into<String>, child: RecordNode) -> Self {
        self.set_child(slot, child);
        self
    }

    /// Set a slot to a single scalar, replacing whatever was there.
    pub fn set_scalar(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(slot.into(), Slot::Scalar(value.into()));
    }

    /// Append a scalar value, promoting a single scalar to a list. A slot
    /// previously holding child records is replaced.
    pub fn push_scalar(&mut self, slot: impl Into<String>, value: impl Into<String>) {
        match self.slots.entry(slot.into()) {
            Entry::Vacant(entry) => {
                entry.insert(Slot::Scalar(value.into()));
            }
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                match current {
                    Slot::Scalar(first) => {
                        let first = std::mem::take(first);
                        *current = Slot::List(vec![first, value.into()]);
                    }
                    Slot::List(values) => values.push(value.into()),
                    Slot::Record(_) | Slot::Records(_) => {
                        *current = Slot::Scalar(value.into());
                    }
                }
            }
        }
    }

    /// Set a slot to a single child record, replacing whatever was there.
    pub fn set_child(&mut self, slot: impl Into<String>, child: RecordNode) {
        self.slots.insert(slot.into(), Slot::Record(Box::new(child)));
    }

    /// Append a child record, promoting a single child to a sequence. A slot
    /// previously holding scalars is replaced.
    pub fn push_child(&mut self, slot: impl Into<String>, child: RecordNode) {
        match self.slots.entry(slot.into()) {
            Entry::Vacant(entry) => {
                entry.insert(Slot::Record(Box::new(child)));
            }
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                match current {
                    Slot::Record(first) => {
                        let first = std::mem::replace(first.as_mut(), RecordNode::new(child.category()));
                        *current = Slot::Records(vec![first, child]);
                    }
                    Slot::Records(children) => children.push(child),
                    Slot::Scalar(_) | Slot::List(_) => {
                        *current = Slot::Record(Box::new(child));
                    }
                }
            }
        }
    }

    /// Raw slot access.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// The single scalar value of a slot, if it holds exactly one.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        match self.slots.get(name) {
            Some(Slot::Scalar(value)) => Some(value),
            _ => None,
        }
    }

    /// Every scalar value in a slot, one-or-many normalized. Empty for
    /// absent or child-holding slots.
    pub fn values(&self, name: &str) -> Vec<&str> {
        match self.slots.get(name) {
            Some(Slot::Scalar(value)) => vec![value.as_str()],
            Some(Slot::List(values)) => values.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Every child record in a slot, one-or-many normalized. Empty for
    /// absent or scalar-holding slots.
    pub fn children(&self, name: &str) -> Vec<&RecordNode> {
        match self.slots.get(name) {
            Some(Slot::Record(child)) => vec![child.as_ref()],
            Some(Slot::Records(children)) => children.iter().collect(),
            _ => Vec::new(),
        }
    }
}
