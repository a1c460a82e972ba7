use crate::font::TextMeasure;
use crate::geometry::{HitOrder, hit_test};
use crate::input::PointerEvent;
use crate::layer::TextLayerStore;
use crate::style::TextStyle;

/// Turns pointer events into selection changes and annotation moves.
///
/// A press selects whatever annotation is under the pointer (or clears the
/// selection); dragging then moves the selected annotation's anchor to the
/// pointer until release.
#[derive(Debug, Default)]
pub struct DragController {
    dragging: bool,
    hit_order: HitOrder,
}

impl DragController {
    pub fn new(hit_order: HitOrder) -> Self {
        Self {
            dragging: false,
            hit_order,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn hit_order(&self) -> HitOrder {
        self.hit_order
    }

    pub fn set_hit_order(&mut self, order: HitOrder) {
        self.hit_order = order;
    }

    pub fn handle<M: TextMeasure + ?Sized>(
        &mut self,
        event: PointerEvent,
        store: &mut TextLayerStore,
        style: &TextStyle,
        measure: &M,
    ) {
        match event {
            PointerEvent::Began(point) => {
                let hit = hit_test(store, point, style, measure, self.hit_order);
                store.set_selection(hit);
                self.dragging = hit.is_some();
                if let Some(index) = hit {
                    log::debug!("Picked annotation {} at {:?}", index, point);
                }
            }
            PointerEvent::Moved(point) => {
                if !self.dragging {
                    return;
                }
                match store.selected() {
                    Some(index) => {
                        store.move_to(index, point);
                    }
                    None => self.dragging = false,
                }
            }
            PointerEvent::Ended => self.dragging = false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::LayerEvent;
    use egui::{Vec2, pos2};

    struct Fixed;

    impl TextMeasure for Fixed {
        fn text_width(&self, text: &str, _family: &str, _size: f32) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn store() -> TextLayerStore {
        let mut store = TextLayerStore::new(Vec2::new(400.0, 400.0));
        store.add("TOP");
        store.move_to(0, pos2(200.0, 50.0));
        store.add("BOTTOM");
        store.move_to(1, pos2(200.0, 350.0));
        store.set_selection(None);
        store.drain_events();
        store
    }

    #[test]
    fn test_press_selects_and_drags() {
        let mut store = store();
        let mut drag = DragController::default();
        let style = TextStyle::default().with_font_size(20.0);

        drag.handle(PointerEvent::Began(pos2(200.0, 350.0)), &mut store, &style, &Fixed);
        assert_eq!(store.selected(), Some(1));
        assert!(drag.is_dragging());

        drag.handle(PointerEvent::Moved(pos2(120.0, 200.0)), &mut store, &style, &Fixed);
        assert_eq!(store.get(1).unwrap().position, pos2(120.0, 200.0));

        drag.handle(PointerEvent::Ended, &mut store, &style, &Fixed);
        assert!(!drag.is_dragging());

        drag.handle(PointerEvent::Moved(pos2(0.0, 0.0)), &mut store, &style, &Fixed);
        assert_eq!(store.get(1).unwrap().position, pos2(120.0, 200.0));
    }

    #[test]
    fn test_press_on_empty_space_clears_selection() {
        let mut store = store();
        let mut drag = DragController::default();
        let style = TextStyle::default().with_font_size(20.0);
        store.set_selection(Some(0));

        drag.handle(PointerEvent::Began(pos2(10.0, 200.0)), &mut store, &style, &Fixed);
        assert_eq!(store.selected(), None);
        assert!(!drag.is_dragging());

        drag.handle(PointerEvent::Moved(pos2(50.0, 50.0)), &mut store, &style, &Fixed);
        assert_eq!(store.get(0).unwrap().position, pos2(200.0, 50.0));
    }

    #[test]
    fn test_drag_records_move_events() {
        let mut store = store();
        let mut drag = DragController::new(HitOrder::Topmost);
        let style = TextStyle::default().with_font_size(20.0);

        drag.handle(PointerEvent::Began(pos2(200.0, 50.0)), &mut store, &style, &Fixed);
        drag.handle(PointerEvent::Moved(pos2(210.0, 60.0)), &mut store, &style, &Fixed);

        assert_eq!(
            store.drain_events(),
            vec![
                LayerEvent::SelectionChanged { old: None, new: Some(0) },
                LayerEvent::Moved { index: 0, position: pos2(210.0, 60.0) },
            ]
        );
    }
}
