use tracing::debug;

use crate::chips::ChipList;
use crate::field::{FieldEvent, FormField};
use crate::surface::InputSurface;
use crate::tags::{join_tags, TagSet};

/// Value accepted by [`TagController::set_value`]: one delimited string or a list of tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagInput {
    Text(String),
    List(Vec<String>),
    Empty,
}

impl TagInput {
    /// The raw text to run through the split path, `None` when there is nothing to add
    fn into_raw(self) -> Option<String> {
        match self {
            TagInput::Text(text) if !text.is_empty() => Some(text),
            TagInput::List(items) if !items.is_empty() => Some(join_tags(items)),
            _ => None,
        }
    }
}

impl From<&str> for TagInput {
    fn from(value: &str) -> Self {
        TagInput::Text(value.to_string())
    }
}

impl From<String> for TagInput {
    fn from(value: String) -> Self {
        TagInput::Text(value)
    }
}

impl From<Vec<String>> for TagInput {
    fn from(value: Vec<String>) -> Self {
        TagInput::List(value)
    }
}

impl From<Vec<&str>> for TagInput {
    fn from(value: Vec<&str>) -> Self {
        TagInput::List(value.into_iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[&str]> for TagInput {
    fn from(value: &[&str]) -> Self {
        TagInput::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<TagInput>> From<Option<T>> for TagInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(TagInput::Empty)
    }
}

/// Owns the tag set for one form field and keeps the chips and the field value in step with it.
///
/// Every mutation that changes the set re-renders the chip list and rewrites the
/// field, then notifies the field's listeners with one `input` and one `change`
/// event. Mutations that change nothing do neither.
#[derive(Debug)]
pub struct TagController {
    id: String,
    tags: TagSet,
    chips: ChipList,
    field: FormField,
    surface: InputSurface,
    render_count: usize,
}

impl TagController {
    /// Take over `field`: hide it, describe the editable surface that replaces it,
    /// and seed tags from its current value
    pub fn new(mut field: FormField, id: impl Into<String>) -> Self {
        let id = id.into();
        field.hide();
        let surface = InputSurface::mirror(&field, &id);
        let initial = field.value().to_string();

        let mut controller = Self {
            id,
            tags: TagSet::new(),
            chips: ChipList::new(),
            field,
            surface,
            render_count: 0,
        };
        if !initial.is_empty() {
            controller.add(&initial);
        }
        controller
    }

    /// Add every new tag found in `raw`. Returns whether anything was inserted.
    pub fn add(&mut self, raw: &str) -> bool {
        let inserted = self.tags.extend_from_raw(raw);
        if inserted == 0 {
            return false;
        }
        debug!(control = %self.id, inserted, total = self.tags.len(), "tags added");
        self.commit();
        true
    }

    /// Remove `tag` if present. Returns whether it was removed.
    pub fn remove(&mut self, tag: &str) -> bool {
        if !self.tags.remove(tag) {
            return false;
        }
        debug!(control = %self.id, tag, "tag removed");
        self.commit();
        true
    }

    /// Remove the most recently inserted tag
    pub fn remove_last(&mut self) -> Option<String> {
        let last = self.tags.pop()?;
        debug!(control = %self.id, tag = %last, "last tag removed");
        self.commit();
        Some(last)
    }

    /// Copy of the current tags, in insertion order
    pub fn value(&self) -> Vec<String> {
        self.tags.to_vec()
    }

    /// Replace all tags. Always re-renders and notifies, even if the result is unchanged.
    pub fn set_value(&mut self, input: impl Into<TagInput>) {
        self.tags.clear();
        if let Some(raw) = input.into().into_raw() {
            self.tags.extend_from_raw(&raw);
        }
        debug!(control = %self.id, total = self.tags.len(), "tags replaced");
        self.commit();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn chips(&self) -> &ChipList {
        &self.chips
    }

    pub fn field(&self) -> &FormField {
        &self.field
    }

    /// Mutable access for subscribing listeners; the value itself is owned by the controller
    pub fn field_mut(&mut self) -> &mut FormField {
        &mut self.field
    }

    pub fn surface(&self) -> &InputSurface {
        &self.surface
    }

    /// Number of chip rebuilds so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    fn commit(&mut self) {
        self.render();
        self.sync();
    }

    fn render(&mut self) {
        self.chips.rebuild(&self.tags);
        self.render_count += 1;
    }

    fn sync(&mut self) {
        let serialized = self.tags.serialize();
        debug!(control = %self.id, value = %serialized, "field synced");
        self.field.set_value(serialized);
        self.field.dispatch(FieldEvent::Input);
        self.field.dispatch(FieldEvent::Change);
    }
}
