//! fpsmon - embeddable frame-rate overlay
//!
//! Samples per-frame timing in a host render loop and renders a live FPS
//! readout with a history graph. The core ([`sampler`], [`classifier`],
//! [`graph`], [`monitor`]) is independent of any drawing surface; [`ui`]
//! paints it with Ratatui.

pub mod classifier;
pub mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod graph;
pub mod host;
pub mod input;
pub mod monitor;
pub mod sampler;
pub mod state;
pub mod terminal_capabilities;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use classifier::{classify_by_duration, classify_by_rate, Status};
pub use config::{Config, OverlayOptions, Position};
pub use error::MonitorError;
pub use monitor::{FpsMonitor, FrameReport, RenderDirective};
pub use sampler::{DisplayStats, FrameSampler};
