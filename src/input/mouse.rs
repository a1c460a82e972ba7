use egui::PointerButton;

use super::{PointerAdapter, PointerEvent, SurfaceMapping};

/// Primary-button mouse input. Leaving the surface while the button is held
/// ends the drag.
#[derive(Debug, Default)]
pub struct MouseAdapter {
    pressed: bool,
}

impl PointerAdapter for MouseAdapter {
    fn translate(&mut self, event: &egui::Event, mapping: &SurfaceMapping) -> Option<PointerEvent> {
        match event {
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed: true,
                ..
            } if mapping.contains(*pos) => {
                self.pressed = true;
                Some(PointerEvent::Began(mapping.to_surface(*pos)))
            }
            egui::Event::PointerButton {
                button: PointerButton::Primary,
                pressed: false,
                ..
            } if self.pressed => {
                self.pressed = false;
                Some(PointerEvent::Ended)
            }
            egui::Event::PointerMoved(pos) if self.pressed => {
                if mapping.contains(*pos) {
                    Some(PointerEvent::Moved(mapping.to_surface(*pos)))
                } else {
                    log::debug!("Pointer left the surface, ending drag");
                    self.pressed = false;
                    Some(PointerEvent::Ended)
                }
            }
            egui::Event::PointerGone if self.pressed => {
                self.pressed = false;
                Some(PointerEvent::Ended)
            }
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        self.pressed
    }
}
