use std::fmt;
use std::sync::Arc;

use egui::{Color32, Pos2};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::brush::LineStyle;
use crate::error::SurfaceError;

/// Opaque encoded capture of the whole surface at one instant.
///
/// Snapshots are deliberately not `Clone`; moving one between the undo and
/// redo stacks moves ownership with it.
pub struct Snapshot {
    id: Uuid,
    bytes: Arc<[u8]>,
}

impl Snapshot {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bytes: bytes.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the encoded bytes, for decode jobs that outlive the borrow
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("id", &self.id)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Pending decode of a snapshot back into pixels
pub type DecodeFuture<D> = LocalBoxFuture<'static, Result<D, SurfaceError>>;

/// The raster the user draws on.
///
/// The canvas never looks at pixels itself; it only asks the target to draw
/// primitives and to encode or restore snapshots.
pub trait RenderTarget {
    /// Decoded pixels, ready to replace the surface contents
    type Decoded: 'static;

    fn encode_snapshot(&self) -> Result<Snapshot, SurfaceError>;

    /// Starts decoding `snapshot`. The surface is untouched until the result is
    /// handed to [`RenderTarget::draw_decoded`].
    fn decode_snapshot(&self, snapshot: &Snapshot) -> DecodeFuture<Self::Decoded>;

    /// Replaces the entire surface with previously decoded pixels
    fn draw_decoded(&mut self, decoded: Self::Decoded);

    fn clear(&mut self);

    fn draw_line(&mut self, from: Pos2, to: Pos2, style: &LineStyle);

    /// Paints an axis-aligned square of side `size` centered on `center`
    fn fill_rect(&mut self, center: Pos2, size: f32, color: Color32);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32, alpha: f32);
}
