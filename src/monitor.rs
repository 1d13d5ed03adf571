//! Overlay lifecycle
//!
//! [`FpsMonitor`] ties a [`FrameSampler`] to the host's clock and frame
//! scheduler, tracks the collapsed state, and produces one [`FrameReport`]
//! per accepted frame for the painter.

use serde::Serialize;
use tracing::debug;

use crate::classifier::{classify_by_rate, Status};
use crate::config::{OverlayOptions, Position};
use crate::host::{Clock, FrameScheduler};
use crate::sampler::{BarSample, DisplayStats, FrameSampler, BUFFER_SIZE};
use crate::theme;

/// Extended statistics shown while the panel is expanded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailStats {
    pub min_fps: u32,
    pub max_fps: u32,
    pub min_status: Status,
    pub max_status: Status,
    #[serde(with = "bars_serde")]
    pub bars: [BarSample; BUFFER_SIZE],
}

/// Everything the painter needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub stats: DisplayStats,
    /// `None` while collapsed
    pub detail: Option<DetailStats>,
}

/// What a collapsed-state change requires from the painter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDirective {
    Unchanged,
    /// Hide the graph and extended statistics
    Collapse,
    /// Show the graph and extended statistics again
    Expand,
}

/// Frame-rate overlay bound to a host clock and scheduler
pub struct FpsMonitor<C: Clock, S: FrameScheduler> {
    sampler: FrameSampler,
    clock: C,
    scheduler: S,
    handle: Option<S::Handle>,
    position: Position,
    collapsed: bool,
}

impl<C: Clock, S: FrameScheduler> FpsMonitor<C, S> {
    /// Create a monitor and start sampling
    pub fn new(options: OverlayOptions, clock: C, scheduler: S) -> Self {
        if options.inject_styles {
            theme::ensure_palette();
        }

        let mut monitor = Self {
            sampler: FrameSampler::new(),
            clock,
            scheduler,
            handle: None,
            position: options.position,
            collapsed: options.collapsed,
        };
        monitor.start();
        monitor
    }

    /// Begin scheduling ticks; no-op while already running
    ///
    /// The timestamp baseline moves to now so the idle gap since the last
    /// stop is never measured as a frame.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        self.sampler.rebase(self.clock.now());
        self.handle = Some(self.scheduler.schedule_next_tick());
        debug!(position = %self.position, "fps monitor started");
    }

    /// Release the scheduling handle; no-op while stopped
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
            debug!("fps monitor stopped");
        }
    }

    /// Stop and release everything the monitor holds
    pub fn destroy(mut self) {
        self.stop();
        debug!(samples = self.sampler.sample_count(), "fps monitor destroyed");
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Host callback for one display refresh
    ///
    /// Ignored while stopped. Otherwise the frame is recorded and the next
    /// tick requested; a report comes back only for accepted samples.
    pub fn tick(&mut self, now: f64) -> Option<FrameReport> {
        self.handle.take()?;

        let accepted = self.sampler.record_frame(now).is_some();
        self.handle = Some(self.scheduler.schedule_next_tick());

        accepted.then(|| self.report())
    }

    /// [`tick`](Self::tick) at the clock's current time
    pub fn on_refresh(&mut self) -> Option<FrameReport> {
        let now = self.clock.now();
        self.tick(now)
    }

    /// Current statistics without sampling
    pub fn report(&self) -> FrameReport {
        FrameReport {
            stats: self.sampler.stats(),
            detail: (!self.collapsed).then(|| self.detail()),
        }
    }

    fn detail(&self) -> DetailStats {
        let min_fps = self.sampler.min_fps_int();
        let max_fps = self.sampler.max_fps_int();
        DetailStats {
            min_fps,
            max_fps,
            min_status: classify_by_rate(min_fps as f64),
            max_status: classify_by_rate(max_fps as f64),
            bars: self.sampler.bars(),
        }
    }

    pub fn set_collapsed(&mut self, collapsed: bool) -> RenderDirective {
        if self.collapsed == collapsed {
            return RenderDirective::Unchanged;
        }
        self.collapsed = collapsed;
        debug!(collapsed, "fps monitor collapsed state changed");
        if collapsed {
            RenderDirective::Collapse
        } else {
            RenderDirective::Expand
        }
    }

    pub fn toggle_collapsed(&mut self) -> RenderDirective {
        self.set_collapsed(!self.collapsed)
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn sampler(&self) -> &FrameSampler {
        &self.sampler
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

impl<C: Clock, S: FrameScheduler> Drop for FpsMonitor<C, S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Serde has no impls for arrays this long
mod bars_serde {
    use serde::ser::{SerializeSeq, Serializer};

    use crate::sampler::{BarSample, BUFFER_SIZE};

    pub fn serialize<S: Serializer>(
        bars: &[BarSample; BUFFER_SIZE],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(bars.len()))?;
        for bar in bars {
            seq.serialize_element(bar)?;
        }
        seq.end()
    }
}
