use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::PaintApp;
use crate::brush::BrushStyle;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Brush");

            let current = app.canvas().brush();
            let mut brush = current;

            ui.horizontal(|ui| {
                ui.label("Size:");
                if ui.button("-").clicked() {
                    brush = brush.decreased();
                }
                ui.label(format!("{:.0}", brush.size()));
                if ui.button("+").clicked() {
                    brush = brush.increased();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = brush.color();
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    brush = brush.with_color(color);
                }
            });

            ui.horizontal(|ui| {
                ui.label("Background:");
                let mut background = brush.background();
                if color_edit_button_srgba(ui, &mut background, Alpha::Opaque).changed() {
                    brush = brush.with_background(background);
                }
            });

            let mut style = brush.style();
            egui::ComboBox::from_label("Style")
                .selected_text(style.label())
                .show_ui(ui, |ui| {
                    for option in BrushStyle::ALL {
                        ui.selectable_value(&mut style, option, option.label());
                    }
                });
            brush = brush.with_style(style);

            let mut opacity = brush.opacity();
            if ui
                .add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("Opacity"))
                .changed()
            {
                brush = brush.with_opacity(opacity);
            }

            if brush != current {
                log::debug!("Brush changed: {:?}", brush);
                app.canvas_mut().set_brush(brush);
            }

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button(app.eraser_label()).clicked() {
                    app.canvas_mut().toggle_eraser();
                }
                if ui.button("Clear").clicked() {
                    app.clear();
                }
                if ui.button("Save").clicked() {
                    app.save();
                }
            });

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.canvas().history().can_undo();
                let can_redo = app.canvas().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            let history = app.canvas().history();
            ui.horizontal(|ui| {
                ui.label(format!("Undo stack size: {}", history.undo_len()));
                ui.label(format!("Redo stack size: {}", history.redo_len()));
            });
        });
}
