//! The main context for the meme editor, coordinating the text layer store,
//! the compositor and the event system.
//!
//! The `EditorContext` is the single entry point the UI talks to. Store
//! mutations never draw anything themselves; they queue change notifications
//! that the context forwards to the event bus. A [`RedrawFlag`] subscribed to
//! the bus marks the surface stale, and [`EditorContext::render_if_needed`]
//! redraws it once per batch of changes.
//!
//! # Flow
//!
//! ```text
//!  add / delete / drag ──► TextLayerStore ──► LayerEvent ──► EventBus
//!                                                             │
//!  render_if_needed ◄──────────── RedrawFlag ◄────────────────┘
//!        │
//!        └──► Compositor::render(surface, store, background, style)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use meme_canvas::config::EditorConfig;
//! use meme_canvas::state::EditorContext;
//!
//! let mut context = EditorContext::new(&EditorConfig::default());
//! context.load_background_bytes(&std::fs::read("cat.png").unwrap()).unwrap();
//! context.add_text("top text");
//! context.render_if_needed();
//! context.export_png(std::path::Path::new("meme.png")).unwrap();
//! ```
use std::path::Path;

use crate::background::{BackgroundImage, ImageRef};
use crate::compositor::Compositor;
use crate::config::EditorConfig;
use crate::drag::DragController;
use crate::error::MemeResult;
use crate::event::{EditorEvent, EventBus, RedrawFlag};
use crate::export;
use crate::font::FontBook;
use crate::geometry::{HitOrder, hit_test};
use crate::input::PointerEvent;
use crate::layer::TextLayerStore;
use crate::style::TextStyle;
use crate::surface::Surface;

#[derive(Debug)]
pub struct EditorContext {
    /// The annotations being edited
    store: TextLayerStore,
    compositor: Compositor,
    surface: Surface,
    /// Shared with whoever loaded it; `None` until the first image arrives
    background: Option<ImageRef>,
    style: TextStyle,
    drag: DragController,
    /// The event bus for broadcasting editor events
    pub event_bus: EventBus,
    redraw: RedrawFlag,
}

impl EditorContext {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_fonts(config, config.build_font_book())
    }

    pub fn with_fonts(config: &EditorConfig, fonts: FontBook) -> Self {
        let surface = Surface::new(config.surface_width, config.surface_height);
        let event_bus = EventBus::new();
        let redraw = RedrawFlag::new();
        event_bus.subscribe(Box::new(redraw.clone()));

        Self {
            store: TextLayerStore::new(surface.size()),
            compositor: Compositor::new(fonts),
            surface,
            background: None,
            style: config.style.clone().sanitized(),
            drag: DragController::new(config.hit_order),
            event_bus,
            redraw,
        }
    }

    pub fn store(&self) -> &TextLayerStore {
        &self.store
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn background(&self) -> Option<&ImageRef> {
        self.background.as_ref()
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn fonts(&self) -> &FontBook {
        self.compositor.fonts()
    }

    pub fn hit_order(&self) -> HitOrder {
        self.drag.hit_order()
    }

    pub fn set_hit_order(&mut self, order: HitOrder) {
        if self.drag.hit_order() != order {
            log::info!("Hit order set to {:?}", order);
            self.drag.set_hit_order(order);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw.is_set() || self.store.has_pending_events()
    }

    pub fn add_text(&mut self, content: &str) -> Option<usize> {
        let index = self.store.add(content);
        self.flush_events();
        index
    }

    /// Deletes the selected annotation, if any.
    pub fn delete_selected(&mut self) -> bool {
        let deleted = self.store.delete().is_some();
        self.flush_events();
        deleted
    }

    pub fn clear_text(&mut self) {
        self.store.clear();
        self.flush_events();
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.store.set_selection(index);
        self.flush_events();
    }

    pub fn move_text(&mut self, index: usize, position: egui::Pos2) -> bool {
        let moved = self.store.move_to(index, position);
        self.flush_events();
        moved
    }

    /// Index of the annotation under `point`, using the configured hit order.
    pub fn annotation_at(&self, point: egui::Pos2) -> Option<usize> {
        hit_test(&self.store, point, &self.style, self.compositor.fonts(), self.drag.hit_order())
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.drag.handle(event, &mut self.store, &self.style, self.compositor.fonts());
        self.flush_events();
    }

    /// Replaces the style, clamping out-of-range values first.
    pub fn set_style(&mut self, style: TextStyle) {
        let style = style.sanitized();
        if style == self.style {
            return;
        }
        self.style = style;
        self.event_bus.emit(EditorEvent::StyleChanged);
    }

    pub fn set_background(&mut self, image: ImageRef) {
        log::info!("Background set to image {} ({:?})", image.id(), image.size());
        self.event_bus.emit(EditorEvent::ImageLoaded {
            id: image.id(),
            size: image.size(),
        });
        self.background = Some(image);
    }

    pub fn load_background_bytes(&mut self, bytes: &[u8]) -> MemeResult<()> {
        let image = BackgroundImage::from_bytes(bytes)?;
        self.set_background(ImageRef::new(image));
        Ok(())
    }

    pub fn load_background_path(&mut self, path: &Path) -> MemeResult<()> {
        let image = BackgroundImage::open(path)?;
        self.set_background(ImageRef::new(image));
        Ok(())
    }

    /// Forwards the store's queued change notifications to the event bus.
    pub fn flush_events(&mut self) {
        for event in self.store.drain_events() {
            self.event_bus.emit(event.into());
        }
    }

    /// Redraws the surface if anything changed since the last render.
    ///
    /// Returns whether the surface was redrawn. Without a background the
    /// request stays pending until one is loaded.
    pub fn render_if_needed(&mut self) -> bool {
        self.flush_events();
        if !self.redraw.is_set() {
            return false;
        }
        self.render()
    }

    /// Unconditionally redraws the surface.
    pub fn render(&mut self) -> bool {
        let rendered = self.compositor.render(
            &mut self.surface,
            &self.store,
            self.background.as_deref(),
            &self.style,
        );
        if rendered {
            self.redraw.take();
        }
        rendered
    }

    /// Renders the latest state and encodes the surface as PNG.
    pub fn encode_png(&mut self) -> MemeResult<Vec<u8>> {
        self.flush_events();
        self.render();
        export::encode_png(&self.surface)
    }

    /// Renders the latest state and writes the surface to `path` as PNG.
    pub fn export_png(&mut self, path: &Path) -> MemeResult<()> {
        self.flush_events();
        self.render();
        export::save_png(&self.surface, path)?;
        self.event_bus.emit(EditorEvent::Exported {
            path: path.to_path_buf(),
        });
        Ok(())
    }
}
