//! Severity classification
//!
//! Maps a frame rate or a frame duration to one of three ordered tiers. The
//! two scales are tuned separately (rate badge vs. per-bar coloring) and are
//! not inverses of each other.

use serde::Serialize;

/// Rate at or above which a reading is good
pub const GOOD_FPS: f64 = 55.0;
/// Rate at or above which a reading is at least a warning
pub const WARN_FPS: f64 = 30.0;
/// Longest frame duration still considered good
pub const GOOD_FRAME_MS: f64 = 18.0;
/// Longest frame duration still considered a warning
pub const WARN_FRAME_MS: f64 = 33.0;

/// Severity tier of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Good,
    Warn,
    Bad,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Warn => "warn",
            Status::Bad => "bad",
        }
    }
}

/// Classify a frame rate
pub fn classify_by_rate(fps: f64) -> Status {
    if fps >= GOOD_FPS {
        Status::Good
    } else if fps >= WARN_FPS {
        Status::Warn
    } else {
        Status::Bad
    }
}

/// Classify a single frame duration in milliseconds
pub fn classify_by_duration(ms: f64) -> Status {
    if ms <= GOOD_FRAME_MS {
        Status::Good
    } else if ms <= WARN_FRAME_MS {
        Status::Warn
    } else {
        Status::Bad
    }
}
