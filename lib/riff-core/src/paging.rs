//! Paging envelope.

use serde::{Deserialize, Serialize};

/// One page of a larger collection.
///
/// Missing `items`, `limit` and `offset` default to empty and zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagable<T> {
    /// Link to this page.
    #[serde(default)]
    pub href: Option<String>,
    /// Items of this page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Page size requested from the server.
    #[serde(default)]
    pub limit: u32,
    /// Link to the next page, `None` on the last page.
    #[serde(default)]
    pub next: Option<String>,
    /// Offset of the first item of this page.
    #[serde(default)]
    pub offset: u32,
    /// Link to the previous page.
    #[serde(default)]
    pub previous: Option<String>,
    /// Total number of items in the collection, if reported.
    #[serde(default)]
    pub total: Option<u32>,
    /// Cursors, for cursor-based collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursors: Option<Cursors>,
}

impl<T> Pagable<T> {
    /// Whether the server reports a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

impl<T> Default for Pagable<T> {
    fn default() -> Self {
        Self {
            href: None,
            items: Vec::new(),
            limit: 0,
            next: None,
            offset: 0,
            previous: None,
            total: None,
            cursors: None,
        }
    }
}

/// Cursor pair of a cursor-based page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursors {
    /// Cursor before the first item.
    #[serde(default)]
    pub before: Option<String>,
    /// Cursor after the last item.
    #[serde(default)]
    pub after: Option<String>,
}
