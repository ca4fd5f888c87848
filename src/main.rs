#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use drawing_pad::{CanvasConfig, PaintApp};

#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "drawing_pad.json";

/// Reads `drawing_pad.json` from the working directory, falling back to defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> CanvasConfig {
    let json = match std::fs::read_to_string(CONFIG_FILE) {
        Ok(json) => json,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return CanvasConfig::default(),
        Err(err) => {
            log::warn!("Could not read {}: {}", CONFIG_FILE, err);
            return CanvasConfig::default();
        }
    };
    match CanvasConfig::from_json_str(&json) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Ignoring {}: {}", CONFIG_FILE, err);
            CanvasConfig::default()
        }
    }
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32 + 260.0, config.height as f32 + 40.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Drawing Pad",
        native_options,
        Box::new(|cc| Ok(Box::new(PaintApp::new(cc, config)?))),
    )
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            log::error!("No document to attach the canvas to");
            return;
        };
        let canvas = match document
            .get_element_by_id("the_canvas_id")
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("the_canvas_id is missing or is not a canvas element");
                return;
            }
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(PaintApp::new(cc, CanvasConfig::default())?))),
            )
            .await;

        if let Err(err) = start_result {
            log::error!("Failed to start eframe: {:?}", err);
        }
    });
}
