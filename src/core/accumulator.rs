//! Step-local data accumulator
//!
//! Each workshop step manages an in-progress draft record plus a running
//! list of saved records. Editing pops the record into a single draft slot
//! and saving reinserts it at its original position, so the list order is
//! stable across edits. Removal never cascades: references held by other
//! records are resolved at report time with an "unknown ..." fallback.

use serde::Serialize;
use std::fmt;

use crate::core::entity::Entity;
use crate::core::identity::EntityId;

/// Field-level validation messages, in the order the checks ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed check for a field
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    /// Check a string field for non-blankness
    pub fn require_non_blank(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, format!("{} is required", field));
        }
    }

    /// Check a rating sits within an inclusive scale
    pub fn require_in_scale(&mut self, field: &str, value: u8, min: u8, max: u8) {
        if value < min || value > max {
            self.push(field, format!("{} must be between {} and {}", field, min, max));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message recorded for a field, if any
    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == name)
            .map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Empty result means Ok
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// Per-record validation of required fields
pub trait Validate {
    fn validate(&self) -> ValidationErrors;
}

/// A record popped out of the list for editing, remembering where it came from
#[derive(Debug, Clone)]
struct Draft<T> {
    item: T,
    index: usize,
}

/// Draft-plus-list manager, instantiated once per entity collection.
/// Serializes transparently as its saved items; the in-flight draft is
/// session-local and never written out.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Accumulator<T: Entity + Validate> {
    items: Vec<T>,
    #[serde(skip)]
    draft: Option<Draft<T>>,
}

impl<T: Entity + Validate> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            draft: None,
        }
    }
}

impl<T: Entity + Validate + Clone> Accumulator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &EntityId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Validate and append a new record. The list is unchanged on failure.
    pub fn add(&mut self, item: T) -> Result<(), ValidationErrors> {
        item.validate().into_result()?;
        self.items.push(item);
        Ok(())
    }

    /// Pop the matching record into the draft slot and return it.
    ///
    /// There is exactly one draft slot: starting an edit while another is
    /// in flight first restores the in-flight record unchanged.
    pub fn start_edit(&mut self, id: &EntityId) -> Option<T> {
        if self.draft.is_some() {
            self.cancel_edit();
        }
        let index = self.items.iter().position(|item| item.id() == id)?;
        let item = self.items.remove(index);
        self.draft = Some(Draft {
            item: item.clone(),
            index,
        });
        Some(item)
    }

    /// The record currently being edited, if any
    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref().map(|d| &d.item)
    }

    /// Validate the updated record and reinsert it at its original index.
    /// On failure the draft stays in flight so the caller can correct it.
    pub fn save_draft(&mut self, updated: T) -> Result<(), ValidationErrors> {
        updated.validate().into_result()?;
        if let Some(draft) = self.draft.take() {
            let index = draft.index.min(self.items.len());
            self.items.insert(index, updated);
        } else {
            self.items.push(updated);
        }
        Ok(())
    }

    /// Abandon the edit, restoring the record unchanged
    pub fn cancel_edit(&mut self) {
        if let Some(draft) = self.draft.take() {
            let index = draft.index.min(self.items.len());
            self.items.insert(index, draft.item);
        }
    }

    /// Remove a record unconditionally. No cascade to dependent records.
    pub fn remove(&mut self, id: &EntityId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        self.items.len() < before
    }

    /// List-level rule gating step advancement: at least one record.
    /// `noun` is the user-facing name of the step's records.
    pub fn submit(&self, noun: &str) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.items.is_empty() {
            errors.push("list", format!("au moins une entrée ({}) est requise", noun));
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::EntityPrefix;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Note {
        id: EntityId,
        name: String,
        body: String,
    }

    impl Note {
        fn new(name: &str, body: &str) -> Self {
            Self {
                id: EntityId::new(EntityPrefix::Thrt),
                name: name.to_string(),
                body: body.to_string(),
            }
        }
    }

    impl Entity for Note {
        const PREFIX: &'static str = "THRT";

        fn id(&self) -> &EntityId {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    impl Validate for Note {
        fn validate(&self) -> ValidationErrors {
            let mut errors = ValidationErrors::new();
            errors.require_non_blank("name", &self.name);
            errors.require_non_blank("body", &self.body);
            errors
        }
    }

    #[test]
    fn test_add_valid() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("a", "b")).unwrap();
        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_add_invalid_leaves_list_unchanged() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        let err = acc.add(Note::new("", "body")).unwrap_err();
        assert!(err.field("name").is_some());
        assert!(acc.is_empty());
    }

    #[test]
    fn test_edit_round_trip_preserves_position() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("first", "1")).unwrap();
        acc.add(Note::new("second", "2")).unwrap();
        acc.add(Note::new("third", "3")).unwrap();

        let id = acc.items()[1].id.clone();
        let draft = acc.start_edit(&id).unwrap();
        assert_eq!(draft.name, "second");
        assert_eq!(acc.len(), 2);

        let mut updated = draft;
        updated.body = "edited".to_string();
        acc.save_draft(updated).unwrap();

        assert_eq!(acc.len(), 3);
        assert_eq!(acc.items()[1].id, id);
        assert_eq!(acc.items()[1].body, "edited");
    }

    #[test]
    fn test_edit_reproduces_exact_field_values() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("keep", "payload")).unwrap();
        let id = acc.items()[0].id.clone();

        let draft = acc.start_edit(&id).unwrap();
        assert_eq!(draft.id, id);
        assert_eq!(draft.name, "keep");
        assert_eq!(draft.body, "payload");
        assert!(acc.is_empty());

        // Saving unchanged reinserts an equal record
        acc.save_draft(draft).unwrap();
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.items()[0].id, id);
        assert_eq!(acc.items()[0].body, "payload");
    }

    #[test]
    fn test_single_draft_slot() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("a", "1")).unwrap();
        acc.add(Note::new("b", "2")).unwrap();
        let id_a = acc.items()[0].id.clone();
        let id_b = acc.items()[1].id.clone();

        acc.start_edit(&id_a);
        // Starting another edit restores the first record unchanged
        acc.start_edit(&id_b);
        assert_eq!(acc.len(), 1);
        assert_eq!(acc.items()[0].id, id_a);
        assert_eq!(acc.draft().unwrap().id, id_b);
    }

    #[test]
    fn test_cancel_edit_restores() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("a", "1")).unwrap();
        acc.add(Note::new("b", "2")).unwrap();
        let id = acc.items()[0].id.clone();

        acc.start_edit(&id);
        acc.cancel_edit();
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.items()[0].id, id);
    }

    #[test]
    fn test_save_draft_invalid_keeps_draft() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("a", "1")).unwrap();
        let id = acc.items()[0].id.clone();

        let mut draft = acc.start_edit(&id).unwrap();
        draft.name = String::new();
        assert!(acc.save_draft(draft).is_err());
        assert!(acc.draft().is_some());
        assert!(acc.is_empty());
    }

    #[test]
    fn test_remove_unconditional() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("a", "1")).unwrap();
        let id = acc.items()[0].id.clone();
        assert!(acc.remove(&id));
        assert!(!acc.remove(&id));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_submit_requires_non_empty() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        let err = acc.submit("note").unwrap_err();
        // The message carries the display noun, not the id prefix
        assert!(err.field("list").unwrap().contains("note"));
        assert!(!err.field("list").unwrap().contains("THRT"));

        acc.add(Note::new("a", "1")).unwrap();
        assert!(acc.submit("note").is_ok());
    }

    #[test]
    fn test_serializes_as_plain_item_list() {
        let mut acc: Accumulator<Note> = Accumulator::new();
        acc.add(Note::new("a", "1")).unwrap();
        acc.add(Note::new("b", "2")).unwrap();
        let id = acc.items()[0].id.clone();
        acc.start_edit(&id);

        // Transparent view over the saved items; the in-flight draft is
        // never written out
        let json = serde_json::to_value(&acc).unwrap();
        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "b");
    }
}
