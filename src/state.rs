//! Application state for the demo host
//!
//! Owns the overlay slot, the synthetic workload that stands in for a real
//! render loop, and the last report handed to the painter.

use std::time::Duration;

use tracing::info;

use crate::config::Config;
use crate::control::MonitorSlot;
use crate::host::{InstantClock, LoopScheduler};
use crate::monitor::{FrameReport, RenderDirective};
use crate::terminal_capabilities::TerminalCapabilities;

/// Frame budget of the demo loop before any extra load
pub const BASE_FRAME_MS: u64 = 16;
/// Step applied by the load keys
pub const LOAD_STEP_MS: u64 = 5;
/// Upper bound for the extra load
pub const MAX_EXTRA_LOAD_MS: u64 = 200;
/// Length of an injected stall
pub const JANK_FRAME_MS: u64 = 120;

pub type HostFactory = fn() -> (InstantClock, LoopScheduler);

fn new_host() -> (InstantClock, LoopScheduler) {
    (InstantClock::new(), LoopScheduler::new())
}

/// Synthetic per-frame work of the demo loop
#[derive(Debug, Clone, Default)]
pub struct Workload {
    pub extra_load_ms: u64,
    jank_pending: bool,
}

impl Workload {
    pub fn increase(&mut self) {
        self.extra_load_ms = (self.extra_load_ms + LOAD_STEP_MS).min(MAX_EXTRA_LOAD_MS);
    }

    pub fn decrease(&mut self) {
        self.extra_load_ms = self.extra_load_ms.saturating_sub(LOAD_STEP_MS);
    }

    /// Make the next frame a single long stall
    pub fn inject_jank(&mut self) {
        self.jank_pending = true;
    }

    /// Budget for the coming frame; consumes a pending stall
    pub fn next_frame_duration(&mut self) -> Duration {
        let jank = if std::mem::take(&mut self.jank_pending) {
            JANK_FRAME_MS
        } else {
            0
        };
        Duration::from_millis(BASE_FRAME_MS + self.extra_load_ms + jank)
    }
}

/// Main application state
pub struct AppState {
    pub config: Config,
    pub capabilities: TerminalCapabilities,
    pub overlay: MonitorSlot<InstantClock, LoopScheduler, HostFactory>,
    pub last_report: Option<FrameReport>,
    pub workload: Workload,
    pub show_help: bool,
    pub should_quit: bool,
    pub status_message: String,
    pub frames_drawn: u64,
}

impl AppState {
    /// Create the state with the overlay already shown
    pub fn new(config: Config, capabilities: TerminalCapabilities) -> Self {
        let mut overlay = MonitorSlot::new(config.overlay, new_host as HostFactory);
        overlay.toggle_with(config.overlay);

        let mut state = Self {
            config,
            capabilities,
            overlay,
            last_report: None,
            workload: Workload::default(),
            show_help: false,
            should_quit: false,
            status_message: String::from("Ready"),
            frames_drawn: 0,
        };
        state.refresh_report();
        state
    }

    /// Host refresh: let the overlay sample this frame
    pub fn on_frame(&mut self) {
        self.frames_drawn += 1;
        let Some(monitor) = self.overlay.monitor_mut() else {
            return;
        };
        // only sample when the monitor asked for this refresh
        if monitor.scheduler().pending().is_none() {
            return;
        }
        if let Some(report) = monitor.on_refresh() {
            self.last_report = Some(report);
        }
    }

    fn refresh_report(&mut self) {
        self.last_report = self.overlay.monitor().map(|m| m.report());
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = message.to_string();
    }

    /// Show or hide the overlay, reopening it where the config puts it
    pub fn toggle_overlay(&mut self) {
        let response = self.overlay.toggle_with(self.config.overlay);
        self.refresh_report();
        self.set_status(if response.active {
            "Overlay shown"
        } else {
            "Overlay hidden"
        });
    }

    pub fn toggle_collapsed(&mut self) {
        let Some(monitor) = self.overlay.monitor_mut() else {
            return;
        };
        match monitor.toggle_collapsed() {
            RenderDirective::Unchanged => {}
            RenderDirective::Collapse | RenderDirective::Expand => self.refresh_report(),
        }
    }

    pub fn collapsed(&self) -> bool {
        self.overlay.monitor().map(|m| m.collapsed()).unwrap_or(true)
    }

    /// Pause or resume sampling without hiding the overlay
    pub fn toggle_sampling(&mut self) {
        let Some(monitor) = self.overlay.monitor_mut() else {
            return;
        };
        if monitor.is_running() {
            monitor.stop();
            self.set_status("Sampling paused");
        } else {
            monitor.start();
            self.set_status("Sampling resumed");
        }
    }

    pub fn sampling(&self) -> bool {
        self.overlay.monitor().map(|m| m.is_running()).unwrap_or(false)
    }

    pub fn increase_load(&mut self) {
        self.workload.increase();
        self.set_status(&format!("Extra load: {}ms", self.workload.extra_load_ms));
    }

    pub fn decrease_load(&mut self) {
        self.workload.decrease();
        self.set_status(&format!("Extra load: {}ms", self.workload.extra_load_ms));
    }

    pub fn inject_jank(&mut self) {
        self.workload.inject_jank();
        info!(stall_ms = JANK_FRAME_MS, "jank frame injected");
        self.set_status("Injected one stalled frame");
    }
}
