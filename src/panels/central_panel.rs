use egui::{Color32, Rect, pos2};

use crate::PaintApp;
use crate::input::InputHandler;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let surface_size = app.canvas().target().dimensions();
        let size = egui::vec2(surface_size[0] as f32, surface_size[1] as f32);

        egui::ScrollArea::both().show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
            let canvas_rect = response.rect;

            // Handle input
            let input = InputHandler::new(canvas_rect, surface_size);
            for event in input.process(&response) {
                app.canvas_mut().handle(event);
            }

            // The background is display-only; the surface itself stays transparent
            painter.rect_filled(canvas_rect, 0.0, app.canvas().brush().background());
            let texture = app.canvas_texture(ctx);
            painter.image(
                texture,
                canvas_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        });
    });
}
