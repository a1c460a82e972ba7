mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::{EditorEvent, LayerEvent};
pub use handlers::RedrawFlag;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent);
}
