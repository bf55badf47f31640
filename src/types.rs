//! Wire types for the reservation API.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// An opaque slot identifier, used as a URL path segment.
///
/// The server defines the identifier format; integers and strings are both
/// accepted and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotId {
    Number(i64),
    Text(String),
}

/// Ids order numerically within the numeric form and lexicographically
/// within the textual form; numeric ids sort before textual ones. Callers
/// use this to pick the earliest of a set of slots.
impl Ord for SlotId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SlotId::Number(a), SlotId::Number(b)) => a.cmp(b),
            (SlotId::Text(a), SlotId::Text(b)) => a.cmp(b),
            (SlotId::Number(_), SlotId::Text(_)) => Ordering::Less,
            (SlotId::Text(_), SlotId::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SlotId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotId::Number(n) => write!(f, "{n}"),
            SlotId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for SlotId {
    fn from(n: i64) -> Self {
        SlotId::Number(n)
    }
}

impl From<i32> for SlotId {
    fn from(n: i32) -> Self {
        SlotId::Number(n.into())
    }
}

impl From<&str> for SlotId {
    fn from(s: &str) -> Self {
        SlotId::Text(s.to_string())
    }
}

impl From<String> for SlotId {
    fn from(s: String) -> Self {
        SlotId::Text(s)
    }
}

/// A reservation slot as reported by the server.
///
/// Only `id` is guaranteed; any other fields the server supplies are kept
/// verbatim in `extra` rather than assumed away, since the schema beyond the
/// identifier is server-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
