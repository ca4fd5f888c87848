use egui::Pos2;

use crate::brush::{BrushConfig, DrawingMode};
use crate::error::SurfaceError;
use crate::history::SnapshotHistory;
use crate::input::PointerEvent;
use crate::raster::RasterSurface;
use crate::restore::RestoreQueue;
use crate::stroke::StrokeRenderer;
use crate::surface::RenderTarget;

/// A drawing session: one render target, the brush settings, the stroke in
/// progress and the snapshot history.
///
/// Every completed stroke and every clear is checkpointed. Undo and redo only
/// move snapshots between the history stacks and queue a restore; the surface
/// changes once [`Canvas::pump`] applies the decoded snapshot.
pub struct Canvas<T: RenderTarget> {
    target: T,
    brush: BrushConfig,
    mode: DrawingMode,
    strokes: StrokeRenderer,
    history: SnapshotHistory,
    restores: RestoreQueue<T::Decoded>,
}

impl<T: RenderTarget> Canvas<T> {
    /// Wraps `target`, capturing its current contents as the history baseline
    pub fn new(target: T, brush: BrushConfig) -> Result<Self, SurfaceError> {
        let baseline = target.encode_snapshot()?;
        log::debug!("Captured baseline snapshot {}", baseline.id());
        Ok(Self {
            target,
            brush: brush.normalized(),
            mode: DrawingMode::Draw,
            strokes: StrokeRenderer::new(),
            history: SnapshotHistory::new(baseline),
            restores: RestoreQueue::new(),
        })
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn brush(&self) -> BrushConfig {
        self.brush
    }

    /// Replaces the brush used by the next stroke
    pub fn set_brush(&mut self, brush: BrushConfig) {
        self.brush = brush.normalized();
    }

    pub fn update_brush(&mut self, update: impl FnOnce(BrushConfig) -> BrushConfig) {
        self.set_brush(update(self.brush));
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.mode = mode;
    }

    pub fn toggle_eraser(&mut self) -> DrawingMode {
        self.mode = self.mode.toggled();
        log::debug!("Drawing mode is now {:?}", self.mode);
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.strokes.is_active()
    }

    pub fn has_pending_restores(&self) -> bool {
        !self.restores.is_empty()
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up => self.pointer_up(),
        }
    }

    /// Starts a stroke at `pos`.
    ///
    /// Ignored while an undo/redo restore is still decoding, since the restore
    /// would overwrite whatever the stroke painted.
    pub fn pointer_down(&mut self, pos: Pos2) {
        self.pump();
        if self.has_pending_restores() {
            log::warn!("Ignoring stroke start while a restore is pending");
            return;
        }
        self.strokes.on_pointer_down(pos, self.brush, self.mode);
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.strokes.on_pointer_move(pos, &mut self.target);
    }

    /// Ends the stroke and checkpoints the result
    pub fn pointer_up(&mut self) {
        if !self.strokes.on_pointer_up() {
            return;
        }
        if let Err(err) = self.checkpoint() {
            log::error!("Failed to checkpoint finished stroke: {}", err);
        }
    }

    /// Captures the surface as the new current state and drops the redo stack
    pub fn checkpoint(&mut self) -> Result<(), SurfaceError> {
        let snapshot = self.target.encode_snapshot()?;
        log::debug!("Checkpoint {}", snapshot.id());
        self.history.checkpoint(snapshot);
        log::debug!(
            "History: {} undo, {} redo",
            self.history.undo_len(),
            self.history.redo_len()
        );
        Ok(())
    }

    /// Clears the surface. The state before clearing stays one undo away.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        self.pump();
        if self.has_pending_restores() {
            log::warn!("Ignoring clear while a restore is pending");
            return Ok(());
        }
        self.pointer_up();
        self.target.clear();
        log::info!("Cleared canvas");
        self.checkpoint()
    }

    /// Steps back one state. Returns whether a restore was queued.
    pub fn undo(&mut self) -> bool {
        self.pointer_up();
        let Some(snapshot) = self.history.undo() else {
            log::debug!("Nothing to undo");
            return false;
        };
        let decode = self.target.decode_snapshot(snapshot);
        self.restores.enqueue(snapshot.id(), decode);
        self.pump();
        true
    }

    /// Steps forward one undone state. Returns whether a restore was queued.
    pub fn redo(&mut self) -> bool {
        self.pointer_up();
        let Some(snapshot) = self.history.redo() else {
            log::debug!("Nothing to redo");
            return false;
        };
        let decode = self.target.decode_snapshot(snapshot);
        self.restores.enqueue(snapshot.id(), decode);
        self.pump();
        true
    }

    /// Draws every finished restore onto the surface in the order they were
    /// requested. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let target = &mut self.target;
        self.restores.drain_ready(|decoded| target.draw_decoded(decoded))
    }
}

impl Canvas<RasterSurface> {
    /// PNG encoding of what the surface shows right now
    pub fn export_png(&mut self) -> Result<Vec<u8>, SurfaceError> {
        self.pump();
        if self.has_pending_restores() {
            log::warn!("Exporting while a restore is still pending");
        }
        self.target.to_png()
    }
}
