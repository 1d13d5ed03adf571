//! Bar-graph layout
//!
//! Turns the 120-slot history into drawing geometry on a fixed logical
//! canvas. Painters issue their own draw calls from the returned shapes; the
//! numbers here are what visual regression checks compare against.

use crate::classifier::Status;
use crate::sampler::{BarSample, BUFFER_SIZE, TARGET_FRAME_MS};

/// Logical canvas width
pub const GRAPH_WIDTH: f64 = 280.0;
/// Logical canvas height
pub const GRAPH_HEIGHT: f64 = 80.0;
/// Gap between neighbouring bars
pub const BAR_GAP: f64 = 1.0;
/// Frame duration mapped to the full graph height
pub const MAX_MS: f64 = 50.0;
/// Duration of the 30fps guide line
pub const THIRTY_FPS_FRAME_MS: f64 = 33.33;
/// Opacity of the oldest bar
pub const MIN_BAR_ALPHA: f64 = 0.4;
/// Opacity of the guide lines
pub const GUIDE_ALPHA: f64 = 0.3;
/// Dash pattern of the guide lines, on then off
pub const GUIDE_DASH: [f64; 2] = [4.0, 4.0];

/// A horizontal reference line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub frame_ms: f64,
    /// Distance from the top of the canvas
    pub y: f64,
    /// Palette entry the line is stroked with
    pub status: Status,
}

/// A single bar ready to be filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub x: f64,
    /// Top edge, measured from the top of the canvas
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub alpha: f64,
    pub status: Status,
}

/// Geometry of the history graph in logical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphLayout {
    pub width: f64,
    pub height: f64,
}

impl Default for GraphLayout {
    fn default() -> Self {
        Self {
            width: GRAPH_WIDTH,
            height: GRAPH_HEIGHT,
        }
    }
}

impl GraphLayout {
    /// Backing-store size in device pixels
    ///
    /// Drawing commands stay in logical units; the painter scales by the
    /// same ratio.
    pub fn backing_size(&self, device_pixel_ratio: f64) -> (u32, u32) {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        (
            (self.width * dpr).round() as u32,
            (self.height * dpr).round() as u32,
        )
    }

    /// Vertical position of a duration, larger durations drawing higher
    pub fn scale_y(&self, frame_ms: f64) -> f64 {
        self.height - (frame_ms / MAX_MS) * self.height
    }

    /// Width of one bar so that all bars plus gaps fill the canvas exactly
    pub fn bar_width(&self) -> f64 {
        (self.width - BAR_GAP * (BUFFER_SIZE as f64 - 1.0)) / BUFFER_SIZE as f64
    }

    /// The 60fps and 30fps reference lines
    pub fn guide_lines(&self) -> [GuideLine; 2] {
        [
            GuideLine {
                frame_ms: TARGET_FRAME_MS,
                y: self.scale_y(TARGET_FRAME_MS),
                status: Status::Good,
            },
            GuideLine {
                frame_ms: THIRTY_FPS_FRAME_MS,
                y: self.scale_y(THIRTY_FPS_FRAME_MS),
                status: Status::Bad,
            },
        ]
    }

    /// Geometry for one history slot; `age_index` 0 is the oldest
    pub fn bar(&self, age_index: usize, sample: &BarSample) -> BarGeometry {
        let width = self.bar_width();
        let clamped_ms = sample.height_ms.min(MAX_MS);
        let height = (clamped_ms / MAX_MS) * self.height;

        BarGeometry {
            x: age_index as f64 * (width + BAR_GAP),
            y: self.height - height,
            width,
            height,
            alpha: MIN_BAR_ALPHA + (1.0 - MIN_BAR_ALPHA) * (age_index as f64 / BUFFER_SIZE as f64),
            status: sample.status,
        }
    }

    /// Geometry for a full history, oldest on the left
    pub fn bars<'a>(
        &'a self,
        samples: &'a [BarSample],
    ) -> impl Iterator<Item = BarGeometry> + 'a {
        samples
            .iter()
            .enumerate()
            .map(move |(i, sample)| self.bar(i, sample))
    }
}
