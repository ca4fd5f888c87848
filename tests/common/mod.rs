#![allow(dead_code)]

use std::cell::RefCell;

use drawing_pad::{DecodeFuture, LineStyle, RenderTarget, Snapshot, SurfaceError};
use egui::{Color32, Pos2};
use futures::FutureExt;
use futures::channel::oneshot;

/// Primitive calls made against the target, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DrawLine { from: Pos2, to: Pos2, style: LineStyle },
    FillRect { center: Pos2, size: f32, color: Color32 },
    FillCircle { center: Pos2, radius: f32 },
    Clear,
    DrawDecoded(String),
}

struct HeldDecode {
    sender: oneshot::Sender<String>,
    contents: String,
}

/// Render target whose "pixels" are a log of the marks painted since the last
/// clear. Decodes either finish immediately or are held until released.
pub struct RecordingTarget {
    marks: Vec<String>,
    pub calls: Vec<Call>,
    hold_decodes: bool,
    held: RefCell<Vec<Option<HeldDecode>>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self {
            marks: Vec::new(),
            calls: Vec::new(),
            hold_decodes: false,
            held: RefCell::new(Vec::new()),
        }
    }

    /// Every later decode stays pending until [`RecordingTarget::release`]
    pub fn holding_decodes() -> Self {
        Self {
            hold_decodes: true,
            ..Self::new()
        }
    }

    pub fn contents(&self) -> String {
        self.marks.join("|")
    }

    /// Completes the `index`-th held decode (counting from zero)
    pub fn release(&self, index: usize) {
        let held = self.held.borrow_mut()[index].take().expect("decode already released");
        held.sender.send(held.contents).expect("decode future dropped");
    }

    /// Drops the `index`-th held decode without completing it
    pub fn abandon(&self, index: usize) {
        self.held.borrow_mut()[index].take();
    }

    pub fn line_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::DrawLine { .. }))
            .count()
    }

    pub fn rect_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::FillRect { .. }))
            .count()
    }
}

impl RenderTarget for RecordingTarget {
    type Decoded = String;

    fn encode_snapshot(&self) -> Result<Snapshot, SurfaceError> {
        Ok(Snapshot::new(self.contents().into_bytes()))
    }

    fn decode_snapshot(&self, snapshot: &Snapshot) -> DecodeFuture<String> {
        let contents = String::from_utf8_lossy(snapshot.bytes()).into_owned();
        if !self.hold_decodes {
            return async move { Ok(contents) }.boxed_local();
        }
        let (sender, receiver) = oneshot::channel();
        self.held
            .borrow_mut()
            .push(Some(HeldDecode { sender, contents }));
        async move { receiver.await.map_err(|_| SurfaceError::DecodeAbandoned) }.boxed_local()
    }

    fn draw_decoded(&mut self, decoded: String) {
        self.calls.push(Call::DrawDecoded(decoded.clone()));
        self.marks = if decoded.is_empty() {
            Vec::new()
        } else {
            decoded.split('|').map(str::to_owned).collect()
        };
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
        self.marks.clear();
    }

    fn draw_line(&mut self, from: Pos2, to: Pos2, style: &LineStyle) {
        self.calls.push(Call::DrawLine {
            from,
            to,
            style: *style,
        });
        self.marks
            .push(format!("line {},{}-{},{}", from.x, from.y, to.x, to.y));
    }

    fn fill_rect(&mut self, center: Pos2, size: f32, color: Color32) {
        self.calls.push(Call::FillRect {
            center,
            size,
            color,
        });
        self.marks.push(format!("rect {},{}", center.x, center.y));
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, _color: Color32, _alpha: f32) {
        self.calls.push(Call::FillCircle { center, radius });
        self.marks.push(format!("disc {},{}", center.x, center.y));
    }
}
