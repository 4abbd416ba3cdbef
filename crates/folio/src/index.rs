//! Registrations of `\addindex` entries.

use log::trace;

/// Receives every index entry the renderer writes an anchor for.
pub trait IndexList {
    fn add_index_item(
        &mut self,
        scope: Option<&str>,
        member: Option<&str>,
        anchor: &str,
        word: &str,
    );
}

/// One registered index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexItem {
    pub scope: Option<String>,
    pub member: Option<String>,
    pub anchor: String,
    pub word: String,
}

/// In-memory index list, in registration order.
#[derive(Debug, Clone, Default)]
pub struct IndexItems {
    items: Vec<IndexItem>,
}

impl IndexItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[IndexItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IndexList for IndexItems {
    fn add_index_item(
        &mut self,
        scope: Option<&str>,
        member: Option<&str>,
        anchor: &str,
        word: &str,
    ) {
        trace!(anchor, word; "Index item");
        self.items.push(IndexItem {
            scope: scope.map(str::to_string),
            member: member.map(str::to_string),
            anchor: anchor.to_string(),
            word: word.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_keep_registration_order() {
        let mut index = IndexItems::new();
        assert!(index.is_empty());

        index.add_index_item(None, None, "tree", "tree");
        index.add_index_item(Some("Tree"), Some("walk"), "a1_walk", "walk");

        assert_eq!(index.len(), 2);
        assert_eq!(index.items()[0].word, "tree");
        assert_eq!(index.items()[1].scope.as_deref(), Some("Tree"));
        assert_eq!(index.items()[1].anchor, "a1_walk");
    }
}
