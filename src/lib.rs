#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod canvas;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod restore;
pub mod stroke;
pub mod surface;

pub use app::PaintApp;
pub use brush::{BrushConfig, BrushStyle, DashPattern, DrawingMode, LineStyle};
pub use canvas::Canvas;
pub use config::CanvasConfig;
pub use error::{ConfigError, ExportError, SurfaceError};
pub use history::SnapshotHistory;
pub use input::{InputHandler, PointerEvent};
pub use raster::RasterSurface;
pub use restore::RestoreQueue;
pub use stroke::StrokeRenderer;
pub use surface::{DecodeFuture, RenderTarget, Snapshot};
