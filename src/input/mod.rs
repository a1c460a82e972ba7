use egui::{Context, Pos2, Rect, Vec2};

mod mouse;
mod touch;

pub use mouse::MouseAdapter;
pub use touch::TouchAdapter;

/// A press, drag or release in surface coordinates, regardless of whether it
/// came from a mouse or a touch screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Began(Pos2),
    Moved(Pos2),
    Ended,
}

/// Maps screen positions onto the surface, which may be displayed scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    /// Where the surface is shown on screen
    pub display_rect: Rect,
    /// Size of the surface in its own pixels
    pub surface_size: Vec2,
}

impl SurfaceMapping {
    pub fn new(display_rect: Rect, surface_size: Vec2) -> Self {
        Self {
            display_rect,
            surface_size,
        }
    }

    pub fn contains(&self, screen: Pos2) -> bool {
        self.display_rect.contains(screen)
    }

    pub fn to_surface(&self, screen: Pos2) -> Pos2 {
        let size = self.display_rect.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return Pos2::ZERO;
        }
        let relative = screen - self.display_rect.min;
        Pos2::new(
            relative.x * self.surface_size.x / size.x,
            relative.y * self.surface_size.y / size.y,
        )
    }
}

/// Translates raw egui events from one input modality into pointer events.
pub trait PointerAdapter {
    fn translate(&mut self, event: &egui::Event, mapping: &SurfaceMapping) -> Option<PointerEvent>;

    /// Whether a press from this modality is currently held.
    fn is_active(&self) -> bool;
}

/// Feeds each frame's raw events through the mouse and touch adapters.
///
/// While a touch is held, mouse events are ignored so that pointer events
/// synthesized by the platform from the same touch are not seen twice.
#[derive(Debug, Default)]
pub struct InputHandler {
    mouse: MouseAdapter,
    touch: TouchAdapter,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process raw egui input and generate pointer events in surface space
    pub fn process_input(&mut self, ctx: &Context, mapping: &SurfaceMapping) -> Vec<PointerEvent> {
        let raw_events = ctx.input(|input| input.raw.events.clone());
        self.process_events(&raw_events, mapping)
    }

    pub fn process_events(&mut self, raw_events: &[egui::Event], mapping: &SurfaceMapping) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        for event in raw_events {
            let translated = if matches!(event, egui::Event::Touch { .. }) {
                self.touch.translate(event, mapping)
            } else if self.touch.is_active() {
                None
            } else {
                self.mouse.translate(event, mapping)
            };
            events.extend(translated);
        }
        events
    }
}
