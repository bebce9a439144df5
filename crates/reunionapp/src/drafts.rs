//! Per-item note drafts.
//!
//! A [`DraftBuffer`] maps item ids to unsaved note text. It lives inside one
//! view session and is dropped with it; nothing here is persisted. An item
//! with no entry has no pending edit, so its draft reads as the persisted
//! notes.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBuffer {
    drafts: HashMap<String, String>,
}

impl DraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.drafts.insert(id.into(), text.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.drafts.get(id).map(String::as_str)
    }

    /// The draft if there is one, else `persisted`.
    pub fn text_or<'a>(&'a self, id: &str, persisted: &'a str) -> &'a str {
        self.get(id).unwrap_or(persisted)
    }

    /// True when a draft exists and differs from `persisted`.
    pub fn is_dirty(&self, id: &str, persisted: &str) -> bool {
        self.get(id).is_some_and(|draft| draft != persisted)
    }

    /// Remove and return the draft for `id`.
    pub fn take(&mut self, id: &str) -> Option<String> {
        self.drafts.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_items_read_persisted_text() {
        let drafts = DraftBuffer::new();
        assert_eq!(drafts.text_or("a", "saved"), "saved");
        assert!(!drafts.is_dirty("a", "saved"));
    }

    #[test]
    fn edits_are_dirty_until_they_match() {
        let mut drafts = DraftBuffer::new();
        drafts.edit("a", "new text");
        assert!(drafts.is_dirty("a", "old text"));
        assert!(!drafts.is_dirty("a", "new text"));
        assert_eq!(drafts.text_or("a", "old text"), "new text");
    }

    #[test]
    fn take_clears_the_entry() {
        let mut drafts = DraftBuffer::new();
        drafts.edit("a", "x");
        assert_eq!(drafts.take("a").as_deref(), Some("x"));
        assert_eq!(drafts.get("a"), None);
        assert_eq!(drafts.take("a"), None);
    }
}
