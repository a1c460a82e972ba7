use egui::{TouchId, TouchPhase};

use super::{PointerAdapter, PointerEvent, SurfaceMapping};

/// Single-finger touch input. Only the first finger down is followed; other
/// fingers are ignored until it lifts.
#[derive(Debug, Default)]
pub struct TouchAdapter {
    active: Option<TouchId>,
}

impl PointerAdapter for TouchAdapter {
    fn translate(&mut self, event: &egui::Event, mapping: &SurfaceMapping) -> Option<PointerEvent> {
        let egui::Event::Touch { id, phase, pos, .. } = event else {
            return None;
        };

        match phase {
            TouchPhase::Start if self.active.is_none() && mapping.contains(*pos) => {
                self.active = Some(*id);
                Some(PointerEvent::Began(mapping.to_surface(*pos)))
            }
            TouchPhase::Move if self.active == Some(*id) => {
                Some(PointerEvent::Moved(mapping.to_surface(*pos)))
            }
            TouchPhase::End | TouchPhase::Cancel if self.active == Some(*id) => {
                self.active = None;
                Some(PointerEvent::Ended)
            }
            _ => None,
        }
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
