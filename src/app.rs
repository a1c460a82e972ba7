use std::path::Path;

use crate::config::EditorConfig;
use crate::file_handler::{FileHandler, PickedImage};
use crate::input::{InputHandler, SurfaceMapping};
use crate::panels::{central_panel, tools_panel};
use crate::state::EditorContext;
use crate::style::TextStyle;
use crate::texture_manager::TextureManager;

/// Key under which the text style is persisted between runs.
pub const STYLE_KEY: &str = "meme_canvas_style";

pub struct MemeApp {
    context: EditorContext,
    input: InputHandler,
    textures: TextureManager,
    files: FileHandler,
    /// Contents of the "add text" field
    text_input: String,
    status: String,
    export_file_name: String,
}

impl MemeApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let mut app = Self::with_config(config);
        if let Some(storage) = cc.storage {
            if let Some(style) = eframe::get_value::<TextStyle>(storage, STYLE_KEY) {
                log::info!("Restored text style {:?}", style);
                app.context.set_style(style);
            }
        }
        app
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            context: EditorContext::new(&config),
            input: InputHandler::new(),
            textures: TextureManager::new(),
            files: FileHandler::new(),
            text_input: String::new(),
            status: "Open an image to get started".to_owned(),
            export_file_name: config.export_file_name,
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EditorContext {
        &mut self.context
    }

    pub fn text_input(&self) -> &str {
        &self.text_input
    }

    pub fn text_input_mut(&mut self) -> &mut String {
        &mut self.text_input
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Adds the typed text as a new annotation and clears the field.
    pub fn add_text_from_input(&mut self) {
        if self.context.add_text(&self.text_input).is_some() {
            log::info!("Added text {:?}", self.text_input);
            self.text_input.clear();
        }
    }

    pub fn delete_selected(&mut self) {
        if self.context.delete_selected() {
            log::info!("Deleted selected text");
        }
    }

    pub fn clear_text(&mut self) {
        log::info!("Cleared all text");
        self.context.clear_text();
    }

    pub fn update_style(&mut self, style: TextStyle) {
        self.context.set_style(style);
    }

    pub fn open_image(&mut self) {
        if let Some(result) = self.files.pick_image() {
            self.accept_image(result);
        }
    }

    /// Loads a background straight from disk, e.g. one named on the command line.
    pub fn open_image_path(&mut self, path: &Path) {
        match self.context.load_background_path(path) {
            Ok(()) => self.set_status(format!("Loaded {}", path.display())),
            Err(err) => {
                log::error!("Failed to load image {}: {}", path.display(), err);
                self.set_status(format!("Could not load image: {}", err));
            }
        }
    }

    fn accept_image(&mut self, result: crate::error::MemeResult<PickedImage>) {
        let outcome = result.and_then(|picked| {
            self.context.load_background_bytes(&picked.bytes)?;
            Ok(picked.name)
        });
        match outcome {
            Ok(name) => self.set_status(format!("Loaded {}", name)),
            Err(err) => {
                log::error!("Failed to load image: {}", err);
                self.set_status(format!("Could not load image: {}", err));
            }
        }
    }

    pub fn export(&mut self) {
        let Some(path) = self.files.pick_export_path(&self.export_file_name) else {
            return;
        };
        match self.context.export_png(&path) {
            Ok(()) => self.set_status(format!("Saved {}", path.display())),
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.set_status(format!("Export failed: {}", err));
            }
        }
    }

    /// Feeds this frame's pointer input to the drag controller.
    pub fn handle_input(&mut self, ctx: &egui::Context, mapping: &SurfaceMapping) {
        for event in self.input.process_input(ctx, mapping) {
            self.context.handle_pointer(event);
        }
    }

    /// Renders if needed and returns the texture showing the surface.
    pub fn surface_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        self.context.render_if_needed();
        self.textures.sync(ctx, self.context.surface())
    }
}

impl eframe::App for MemeApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STYLE_KEY, self.context.style());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.files.check_for_dropped_files(ctx) {
            if let Some(result) = self.files.take_dropped_image() {
                self.accept_image(result);
            }
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.files.preview_files_being_dropped(ctx);
    }
}
