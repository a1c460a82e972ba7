#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod background;
pub mod compositor;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod export;
pub mod file_handler;
pub mod font;
pub mod geometry;
pub mod input;
pub mod layer;
pub mod panels;
pub mod state;
pub mod style;
pub mod surface;
pub mod texture_manager;
pub mod wrap;

pub use app::MemeApp;
pub use background::{BackgroundImage, ImageRef};
pub use compositor::Compositor;
pub use config::EditorConfig;
pub use error::{MemeError, MemeResult};
pub use font::{FontBook, TextMeasure};
pub use geometry::HitOrder;
pub use input::PointerEvent;
pub use layer::{TextAnnotation, TextLayerStore};
pub use state::EditorContext;
pub use style::TextStyle;
pub use surface::Surface;
