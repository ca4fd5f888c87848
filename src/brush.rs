use egui::Color32;
use serde::{Deserialize, Serialize};

pub const MIN_BRUSH_SIZE: f32 = 5.0;
pub const MAX_BRUSH_SIZE: f32 = 50.0;
pub const BRUSH_SIZE_STEP: f32 = 5.0;
pub const DEFAULT_BRUSH_SIZE: f32 = 20.0;

/// How a drawn segment is broken up along its length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

impl BrushStyle {
    pub const ALL: [BrushStyle; 3] = [BrushStyle::Solid, BrushStyle::Dotted, BrushStyle::Dashed];

    pub fn label(self) -> &'static str {
        match self {
            BrushStyle::Solid => "Solid",
            BrushStyle::Dotted => "Dotted",
            BrushStyle::Dashed => "Dashed",
        }
    }

    pub fn dash(self) -> Option<DashPattern> {
        match self {
            BrushStyle::Solid => None,
            BrushStyle::Dotted => Some(DashPattern { on: 5.0, off: 15.0 }),
            BrushStyle::Dashed => Some(DashPattern { on: 10.0, off: 10.0 }),
        }
    }
}

/// Alternating painted/skipped lengths, in pixels, measured from the start of a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub on: f32,
    pub off: f32,
}

impl DashPattern {
    pub fn period(&self) -> f32 {
        self.on + self.off
    }

    /// Whether the point `distance` pixels along the segment falls on a painted dash
    pub fn is_on(&self, distance: f32) -> bool {
        let period = self.period();
        if period <= 0.0 {
            return true;
        }
        distance.rem_euclid(period) < self.on
    }
}

/// Everything `draw_line` needs to paint one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color32,
    pub dash: Option<DashPattern>,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawingMode {
    #[default]
    Draw,
    Erase,
}

impl DrawingMode {
    pub fn toggled(self) -> Self {
        match self {
            DrawingMode::Draw => DrawingMode::Erase,
            DrawingMode::Erase => DrawingMode::Draw,
        }
    }
}

/// The brush settings in effect for the next stroke.
///
/// This is a plain value: every setter returns a new configuration with the
/// input clamped into range, so an out-of-range control can never leave an
/// invalid brush behind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    size: f32,
    color: Color32,
    style: BrushStyle,
    opacity: f32,
    background: Color32,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BRUSH_SIZE,
            color: Color32::BLACK,
            style: BrushStyle::Solid,
            opacity: 1.0,
            background: Color32::WHITE,
        }
    }
}

impl BrushConfig {
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn style(&self) -> BrushStyle {
        self.style
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn with_size(self, size: f32) -> Self {
        Self {
            size: clamp_size(size),
            ..self
        }
    }

    /// One step up on the size stepper
    pub fn increased(self) -> Self {
        self.with_size(self.size + BRUSH_SIZE_STEP)
    }

    /// One step down on the size stepper
    pub fn decreased(self) -> Self {
        self.with_size(self.size - BRUSH_SIZE_STEP)
    }

    pub fn with_color(self, color: Color32) -> Self {
        Self { color, ..self }
    }

    pub fn with_style(self, style: BrushStyle) -> Self {
        Self { style, ..self }
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        Self {
            opacity: clamp_opacity(opacity),
            ..self
        }
    }

    pub fn with_background(self, background: Color32) -> Self {
        Self { background, ..self }
    }

    /// Re-applies the bounds, for values that arrived from outside (e.g. deserialized)
    pub fn normalized(self) -> Self {
        Self {
            size: clamp_size(self.size),
            opacity: clamp_opacity(self.opacity),
            ..self
        }
    }

    pub fn line_style(&self) -> LineStyle {
        LineStyle {
            width: self.size,
            color: self.color,
            dash: self.style.dash(),
            alpha: self.opacity,
        }
    }
}

fn clamp_size(size: f32) -> f32 {
    if size.is_nan() {
        return DEFAULT_BRUSH_SIZE;
    }
    size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE)
}

fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        return 1.0;
    }
    opacity.clamp(0.0, 1.0)
}
