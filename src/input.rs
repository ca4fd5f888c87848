use egui::{Pos2, Rect, Response};

/// Pointer input in surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed on the canvas
    Down(Pos2),
    /// Pointer moved while the button is held
    Move(Pos2),
    /// Button released
    Up,
}

/// Converts egui pointer interaction on the canvas widget into [`PointerEvent`]s
pub struct InputHandler {
    /// Screen-space rectangle the surface is drawn into
    canvas_rect: Rect,
    /// Surface size in pixels
    surface_size: [u32; 2],
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, surface_size: [u32; 2]) -> Self {
        Self {
            canvas_rect,
            surface_size,
        }
    }

    /// Maps a screen position onto the surface, scaling if the widget is not 1:1
    pub fn to_surface(&self, screen: Pos2) -> Pos2 {
        let rect = self.canvas_rect;
        let scale_x = if rect.width() > 0.0 {
            self.surface_size[0] as f32 / rect.width()
        } else {
            1.0
        };
        let scale_y = if rect.height() > 0.0 {
            self.surface_size[1] as f32 / rect.height()
        } else {
            1.0
        };
        Pos2::new(
            (screen.x - rect.min.x) * scale_x,
            (screen.y - rect.min.y) * scale_y,
        )
    }

    /// Events for this frame, in the order they should be handled
    pub fn process(&self, response: &Response) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let pointer = response.interact_pointer_pos();

        if response.drag_started() {
            if let Some(pos) = pointer {
                events.push(PointerEvent::Down(self.to_surface(pos)));
            }
        }
        if response.dragged() {
            if let Some(pos) = pointer {
                events.push(PointerEvent::Move(self.to_surface(pos)));
            }
        }
        if response.drag_stopped() {
            events.push(PointerEvent::Up);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_to_surface_offsets_by_canvas_origin() {
        let rect = Rect::from_min_size(pos2(100.0, 50.0), egui::vec2(200.0, 100.0));
        let input = InputHandler::new(rect, [200, 100]);
        assert_eq!(input.to_surface(pos2(110.0, 60.0)), pos2(10.0, 10.0));
    }

    #[test]
    fn test_to_surface_scales_when_not_one_to_one() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(100.0, 50.0));
        let input = InputHandler::new(rect, [200, 100]);
        assert_eq!(input.to_surface(pos2(50.0, 25.0)), pos2(100.0, 50.0));
    }
}
