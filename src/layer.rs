use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::LayerEvent;

/// A piece of user text placed on the image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextAnnotation {
    /// Stable identifier, unaffected by index shifts after deletions
    pub id: Uuid,
    /// Text as typed; uppercased only when drawn
    pub content: String,
    /// Anchor of the text block in surface coordinates
    pub position: Pos2,
}

impl TextAnnotation {
    pub fn new(content: &str, position: Pos2) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.to_owned(),
            position,
        }
    }

    /// The text as it appears on the surface.
    pub fn display_text(&self) -> String {
        self.content.to_uppercase()
    }
}

/// Ordered text annotations plus the current selection.
///
/// Insertion order is render order, so later annotations draw on top. Every
/// mutation queues a [`LayerEvent`]; callers drain them with
/// [`TextLayerStore::drain_events`] and redraw in response.
#[derive(Debug, Clone, Default)]
pub struct TextLayerStore {
    annotations: Vec<TextAnnotation>,
    selected: Option<usize>,
    surface_size: Vec2,
    pending: Vec<LayerEvent>,
}

impl TextLayerStore {
    pub fn new(surface_size: Vec2) -> Self {
        Self {
            surface_size,
            ..Default::default()
        }
    }

    /// Appends an annotation at the center of the surface and selects it.
    ///
    /// Text that is empty after trimming is ignored.
    pub fn add(&mut self, content: &str) -> Option<usize> {
        if content.trim().is_empty() {
            log::debug!("Ignoring empty annotation text");
            return None;
        }

        let center = (self.surface_size / 2.0).to_pos2();
        self.annotations.push(TextAnnotation::new(content, center));
        let index = self.annotations.len() - 1;
        self.selected = Some(index);

        log::info!("Added annotation {} at {:?}", index, center);
        self.pending.push(LayerEvent::Added { index });
        Some(index)
    }

    /// Removes the selected annotation and clears the selection.
    ///
    /// Annotations after the removed one shift down by one index.
    pub fn delete(&mut self) -> Option<TextAnnotation> {
        let index = self.selected?;
        let removed = self.annotations.remove(index);
        self.selected = None;

        log::info!("Deleted annotation {} ({})", index, removed.id);
        self.pending.push(LayerEvent::Removed { index });
        Some(removed)
    }

    /// Removes the annotation at `index` only if it is the current selection.
    pub fn delete_at(&mut self, index: usize) -> Option<TextAnnotation> {
        if self.selected != Some(index) {
            log::debug!("Ignoring delete of unselected annotation {}", index);
            return None;
        }
        self.delete()
    }

    /// Selects `index`, or clears the selection when `index` is `None` or out
    /// of range.
    pub fn set_selection(&mut self, index: Option<usize>) {
        let new = index.filter(|&i| i < self.annotations.len());
        if new == self.selected {
            return;
        }

        let old = self.selected;
        self.selected = new;
        self.pending.push(LayerEvent::SelectionChanged { old, new });
    }

    /// Moves the annotation at `index` so its anchor sits at `position`.
    pub fn move_to(&mut self, index: usize, position: Pos2) -> bool {
        let Some(annotation) = self.annotations.get_mut(index) else {
            return false;
        };
        annotation.position = position;
        self.pending.push(LayerEvent::Moved { index, position });
        true
    }

    /// Removes every annotation and the selection.
    pub fn clear(&mut self) {
        if self.annotations.is_empty() {
            return;
        }
        self.annotations.clear();
        self.selected = None;
        self.pending.push(LayerEvent::Cleared);
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TextAnnotation> {
        self.annotations.get(index)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &TextAnnotation)> + '_ {
        self.annotations.iter().enumerate()
    }

    pub fn annotations(&self) -> &[TextAnnotation] {
        &self.annotations
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_annotation(&self) -> Option<&TextAnnotation> {
        self.selected.and_then(|i| self.annotations.get(i))
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface_size
    }

    /// Changes where new annotations are centered. Existing annotations keep
    /// their positions.
    pub fn set_surface_size(&mut self, size: Vec2) {
        self.surface_size = size;
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Takes the change notifications recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<LayerEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TextLayerStore {
        TextLayerStore::new(Vec2::new(600.0, 400.0))
    }

    #[test]
    fn test_add_places_at_center_and_selects() {
        let mut store = store();
        let index = store.add("hello").unwrap();

        assert_eq!(index, 0);
        assert_eq!(store.selected(), Some(0));
        assert_eq!(store.get(0).unwrap().position, Pos2::new(300.0, 200.0));
        assert_eq!(store.get(0).unwrap().content, "hello");
        assert_eq!(store.get(0).unwrap().display_text(), "HELLO");
    }

    #[test]
    fn test_add_blank_is_ignored() {
        let mut store = store();
        store.add("first");
        store.drain_events();

        assert_eq!(store.add(""), None);
        assert_eq!(store.add("   "), None);
        assert_eq!(store.add("\t\n"), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected(), Some(0));
        assert!(!store.has_pending_events());
    }

    #[test]
    fn test_delete_resets_selection() {
        let mut store = store();
        store.add("a");
        store.add("b");
        store.add("c");
        store.set_selection(Some(1));

        let removed = store.delete().unwrap();
        assert_eq!(removed.content, "b");
        assert_eq!(store.len(), 2);
        assert_eq!(store.selected(), None);
        assert_eq!(store.get(1).unwrap().content, "c");
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut store = store();
        store.add("a");
        store.set_selection(None);
        store.drain_events();

        assert!(store.delete().is_none());
        assert_eq!(store.len(), 1);
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_delete_at_requires_matching_selection() {
        let mut store = store();
        store.add("a");
        store.add("b");

        assert!(store.delete_at(0).is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(store.delete_at(1).unwrap().content, "b");
        assert_eq!(store.selected(), None);
    }

    #[test]
    fn test_out_of_range_selection_clears() {
        let mut store = store();
        store.add("a");
        store.set_selection(Some(5));
        assert_eq!(store.selected(), None);

        store.set_selection(Some(0));
        assert_eq!(store.selected(), Some(0));
    }

    #[test]
    fn test_move_out_of_bounds_is_noop() {
        let mut store = store();
        store.add("a");
        store.drain_events();

        assert!(!store.move_to(3, Pos2::new(1.0, 1.0)));
        assert!(store.drain_events().is_empty());
        assert!(store.move_to(0, Pos2::new(1.0, 2.0)));
        assert_eq!(store.get(0).unwrap().position, Pos2::new(1.0, 2.0));
    }

    #[test]
    fn test_mutations_queue_events() {
        let mut store = store();
        store.add("a");
        store.move_to(0, Pos2::new(10.0, 20.0));
        store.set_selection(None);
        store.add("b");
        store.delete();

        let events = store.drain_events();
        assert_eq!(
            events,
            vec![
                LayerEvent::Added { index: 0 },
                LayerEvent::Moved { index: 0, position: Pos2::new(10.0, 20.0) },
                LayerEvent::SelectionChanged { old: Some(0), new: None },
                LayerEvent::Added { index: 1 },
                LayerEvent::Removed { index: 1 },
            ]
        );
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = store();
        store.add("a");
        store.add("b");
        store.drain_events();

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.selected(), None);
        assert_eq!(store.drain_events(), vec![LayerEvent::Cleared]);

        store.clear();
        assert!(store.drain_events().is_empty());
    }

    #[test]
    fn test_ids_survive_index_shift() {
        let mut store = store();
        store.add("a");
        store.add("b");
        let id_b = store.get(1).unwrap().id;

        store.set_selection(Some(0));
        store.delete();
        assert_eq!(store.get(0).unwrap().id, id_b);
    }
}
