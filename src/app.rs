use egui::{Key, KeyboardShortcut, Modifiers, TextureOptions};

use crate::brush::DrawingMode;
use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::error::SurfaceError;
use crate::export;
use crate::panels::{central_panel, tools_panel};
use crate::raster::RasterSurface;

const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

pub struct PaintApp {
    canvas: Canvas<RasterSurface>,
    config: CanvasConfig,
    // GPU copy of the surface, re-uploaded when the surface revision moves
    texture: Option<egui::TextureHandle>,
    uploaded_revision: Option<u64>,
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Result<Self, SurfaceError> {
        Self::with_config(config)
    }

    pub fn with_config(config: CanvasConfig) -> Result<Self, SurfaceError> {
        let surface = RasterSurface::new(config.width, config.height);
        let canvas = Canvas::new(surface, config.brush)?;
        log::info!("Created {}x{} canvas", config.width, config.height);
        Ok(Self {
            canvas,
            config,
            texture: None,
            uploaded_revision: None,
        })
    }

    pub fn canvas(&self) -> &Canvas<RasterSurface> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<RasterSurface> {
        &mut self.canvas
    }

    /// Label for the eraser toggle: the mode a click switches to
    pub fn eraser_label(&self) -> &'static str {
        match self.canvas.mode() {
            DrawingMode::Draw => "Eraser",
            DrawingMode::Erase => "Drawing",
        }
    }

    pub fn undo(&mut self) {
        self.canvas.undo();
    }

    pub fn redo(&mut self) {
        self.canvas.redo();
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.canvas.clear() {
            log::error!("Failed to checkpoint cleared canvas: {}", err);
        }
    }

    pub fn save(&mut self) {
        let result = self
            .canvas
            .export_png()
            .map_err(Into::into)
            .and_then(|png| export::save_png(&png, &self.config.export_file_name));
        if let Err(err) = result {
            log::error!("Failed to save drawing: {}", err);
        }
    }

    /// Texture holding the current surface pixels
    pub fn canvas_texture(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let surface = self.canvas.target();
        let revision = surface.revision();

        match &mut self.texture {
            Some(texture) if self.uploaded_revision == Some(revision) => texture.id(),
            Some(texture) => {
                texture.set(surface.to_color_image(), TextureOptions::NEAREST);
                self.uploaded_revision = Some(revision);
                texture.id()
            }
            None => {
                let texture =
                    ctx.load_texture("canvas", surface.to_color_image(), TextureOptions::NEAREST);
                let id = texture.id();
                self.texture = Some(texture);
                self.uploaded_revision = Some(revision);
                id
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.input_mut(|i| i.consume_shortcut(&UNDO_SHORTCUT)) {
            self.undo();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&REDO_SHORTCUT)) {
            self.redo();
        }
    }
}

impl eframe::App for PaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.canvas.pump();
        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        // Decodes finish between frames
        if self.canvas.has_pending_restores() {
            ctx.request_repaint();
        }
    }
}
