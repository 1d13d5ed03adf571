//! Overlay palette
//!
//! The palette is a process-wide style resource. Hosts call
//! [`ensure_palette`] to install the default at most once; painters read
//! [`active`], which falls back to the built-in colors when nothing was
//! installed, so a host that brings its own styling still gets sane output.

use std::sync::OnceLock;

use tracing::debug;

use crate::classifier::Status;
use crate::color::Rgb;

static PALETTE: OnceLock<Palette> = OnceLock::new();

/// Colors used by the overlay panel and graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub good: Rgb,
    pub warn: Rgb,
    pub bad: Rgb,
    /// Panel background
    pub panel: Rgb,
    /// Graph background, the panel darkened by a 30% black fill
    pub graph: Rgb,
    pub text: Rgb,
    pub label: Rgb,
    pub muted: Rgb,
    pub faint: Rgb,
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        good: Rgb::new(0x22, 0xc5, 0x5e),
        warn: Rgb::new(0xea, 0xb3, 0x08),
        bad: Rgb::new(0xef, 0x44, 0x44),
        panel: Rgb::new(15, 23, 42),
        graph: Rgb::new(11, 16, 29),
        text: Rgb::new(0xe2, 0xe8, 0xf0),
        label: Rgb::new(0x94, 0xa3, 0xb8),
        muted: Rgb::new(0x64, 0x74, 0x8b),
        faint: Rgb::new(0x47, 0x55, 0x69),
    };

    pub fn status(&self, status: Status) -> Rgb {
        match status {
            Status::Good => self.good,
            Status::Warn => self.warn,
            Status::Bad => self.bad,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::DEFAULT
    }
}

/// Install the default palette unless one is already present
///
/// Returns `true` only for the call that performed the install.
pub fn ensure_palette() -> bool {
    install(Palette::DEFAULT)
}

/// Install `palette` unless one is already present
pub fn install(palette: Palette) -> bool {
    let installed = PALETTE.set(palette).is_ok();
    if installed {
        debug!(
            good = %palette.good.to_hex(),
            warn = %palette.warn.to_hex(),
            bad = %palette.bad.to_hex(),
            "overlay palette installed"
        );
    }
    installed
}

/// Installed palette, or the built-in colors
pub fn active() -> Palette {
    PALETTE.get().copied().unwrap_or_default()
}
