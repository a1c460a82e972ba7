use std::path::PathBuf;

use eframe::egui::Pos2;

/// Change notifications recorded by the text layer store.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerEvent {
    Added { index: usize },
    Removed { index: usize },
    Moved { index: usize, position: Pos2 },
    SelectionChanged { old: Option<usize>, new: Option<usize> },
    Cleared,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    Layer(LayerEvent),
    ImageLoaded {
        id: usize,
        size: [u32; 2],
    },
    StyleChanged,
    Exported {
        path: PathBuf,
    },
}

impl EditorEvent {
    /// Whether the surface no longer reflects the editor state after this event.
    pub fn invalidates_surface(&self) -> bool {
        !matches!(self, EditorEvent::Exported { .. })
    }
}

impl From<LayerEvent> for EditorEvent {
    fn from(event: LayerEvent) -> Self {
        EditorEvent::Layer(event)
    }
}
