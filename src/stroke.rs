use egui::Pos2;

use crate::brush::{BrushConfig, DrawingMode};
use crate::surface::RenderTarget;

/// A stroke in progress. The brush and mode are copied in at pointer-down, so
/// settings changed mid-drag only affect the next stroke.
#[derive(Debug, Clone, Copy)]
struct ActiveStroke {
    anchor: Pos2,
    brush: BrushConfig,
    mode: DrawingMode,
}

/// Turns pointer drags into immediate draw/erase calls on a render target
#[derive(Debug, Default)]
pub struct StrokeRenderer {
    current_stroke: Option<ActiveStroke>,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.current_stroke.is_some()
    }

    pub fn on_pointer_down(&mut self, pos: Pos2, brush: BrushConfig, mode: DrawingMode) {
        self.current_stroke = Some(ActiveStroke {
            anchor: pos,
            brush,
            mode,
        });
    }

    /// Paints from the anchor to `pos` (or stamps the eraser at `pos`) and
    /// moves the anchor. Does nothing when no stroke is active.
    pub fn on_pointer_move<T: RenderTarget>(&mut self, pos: Pos2, target: &mut T) {
        let Some(stroke) = &mut self.current_stroke else {
            return;
        };

        match stroke.mode {
            DrawingMode::Erase => {
                target.fill_rect(pos, stroke.brush.size(), stroke.brush.background());
            }
            DrawingMode::Draw => {
                target.draw_line(stroke.anchor, pos, &stroke.brush.line_style());
            }
        }
        stroke.anchor = pos;
    }

    /// Ends the stroke. Returns whether a stroke was actually in progress.
    pub fn on_pointer_up(&mut self) -> bool {
        self.current_stroke.take().is_some()
    }

    /// Filled disc of radius `brush.size()` in the brush color and opacity.
    ///
    /// Not bound to any pointer gesture.
    pub fn stamp_disc<T: RenderTarget>(target: &mut T, center: Pos2, brush: &BrushConfig) {
        target.fill_circle(center, brush.size(), brush.color(), brush.opacity());
    }
}
