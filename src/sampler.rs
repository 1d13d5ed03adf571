//! Frame-timing sampler
//!
//! Fixed-capacity circular buffer of inter-frame intervals with a windowed
//! average and warm-up gated min/max tracking.

use serde::Serialize;
use tracing::trace;

use crate::classifier::{classify_by_duration, classify_by_rate, Status};

/// Number of intervals kept in the history buffer
pub const BUFFER_SIZE: usize = 120;
/// Frame rate the overlay is tuned for
pub const TARGET_FPS: f64 = 60.0;
/// Duration of one frame at the target rate
pub const TARGET_FRAME_MS: f64 = 1000.0 / TARGET_FPS;
/// Number of most recent intervals averaged for the live readout
pub const AVERAGE_WINDOW: usize = 20;
/// Accepted samples that must pass before extremes are tracked
pub const WARMUP_SAMPLES: u64 = 60;
/// Intervals at or above this are treated as clock anomalies
pub const MAX_DELTA_MS: f64 = 500.0;

/// Live readout derived from the most recent intervals
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayStats {
    pub average_frame_ms: f64,
    pub average_fps: u32,
    pub status: Status,
}

/// One history slot as handed to the graph painter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarSample {
    /// Raw interval, not clamped
    pub height_ms: f64,
    pub status: Status,
}

impl BarSample {
    pub fn new(height_ms: f64) -> Self {
        Self {
            height_ms,
            status: classify_by_duration(height_ms),
        }
    }
}

/// Why a timestamp produced no sample
#[derive(Debug, Clone, Copy, PartialEq)]
enum ClockAnomaly {
    /// No earlier timestamp to measure against
    NoBaseline,
    /// Delta outside `(0, MAX_DELTA_MS)`
    OutOfRange(f64),
}

/// Circular buffer of frame intervals plus derived statistics
#[derive(Debug, Clone)]
pub struct FrameSampler {
    samples: [f64; BUFFER_SIZE],
    write_index: usize,
    sample_count: u64,
    last_timestamp: Option<f64>,
    min_fps: f64,
    max_fps: f64,
    stats: DisplayStats,
}

impl FrameSampler {
    pub fn new() -> Self {
        let samples = [TARGET_FRAME_MS; BUFFER_SIZE];
        let mut sampler = Self {
            samples,
            write_index: 0,
            sample_count: 0,
            last_timestamp: None,
            min_fps: TARGET_FPS,
            max_fps: TARGET_FPS,
            stats: DisplayStats {
                average_frame_ms: TARGET_FRAME_MS,
                average_fps: TARGET_FPS as u32,
                status: Status::Good,
            },
        };
        sampler.update_stats();
        sampler
    }

    /// Record the timestamp of a new frame, in milliseconds
    ///
    /// Returns the refreshed statistics when the interval since the previous
    /// call was accepted. The stored timestamp advances either way, so one
    /// bad reading never desyncs the ones after it.
    pub fn record_frame(&mut self, now: f64) -> Option<DisplayStats> {
        let previous = self.last_timestamp.replace(now);

        let delta = match Self::validate(previous, now) {
            Ok(delta) => delta,
            Err(ClockAnomaly::NoBaseline) => {
                trace!("frame sample dropped, no baseline");
                return None;
            }
            Err(ClockAnomaly::OutOfRange(delta)) => {
                trace!(delta, "frame sample dropped, delta out of range");
                return None;
            }
        };

        self.samples[self.write_index] = delta;
        self.write_index = (self.write_index + 1) % BUFFER_SIZE;
        self.sample_count += 1;

        if self.sample_count > WARMUP_SAMPLES {
            let current_fps = 1000.0 / delta;
            if current_fps < self.min_fps {
                self.min_fps = current_fps;
            }
            if current_fps > self.max_fps {
                self.max_fps = current_fps;
            }
        }

        self.update_stats();
        Some(self.stats)
    }

    fn validate(previous: Option<f64>, now: f64) -> Result<f64, ClockAnomaly> {
        let previous = previous.ok_or(ClockAnomaly::NoBaseline)?;
        let delta = now - previous;
        if delta > 0.0 && delta < MAX_DELTA_MS {
            Ok(delta)
        } else {
            Err(ClockAnomaly::OutOfRange(delta))
        }
    }

    /// Move the timestamp baseline without taking a sample
    pub fn rebase(&mut self, now: f64) {
        self.last_timestamp = Some(now);
    }

    /// Recompute the windowed average from the slots just written
    fn update_stats(&mut self) {
        let window = AVERAGE_WINDOW.min(BUFFER_SIZE);
        let sum: f64 = (0..window)
            .map(|i| self.samples[(self.write_index + BUFFER_SIZE - 1 - i) % BUFFER_SIZE])
            .sum();
        let average_frame_ms = sum / window as f64;
        let average_fps = (1000.0 / average_frame_ms).round() as u32;

        self.stats = DisplayStats {
            average_frame_ms,
            average_fps,
            status: classify_by_rate(average_fps as f64),
        };
    }

    pub fn stats(&self) -> DisplayStats {
        self.stats
    }

    pub fn min_fps(&self) -> f64 {
        self.min_fps
    }

    pub fn max_fps(&self) -> f64 {
        self.max_fps
    }

    /// Lowest observed rate, rounded for display
    pub fn min_fps_int(&self) -> u32 {
        self.min_fps.round() as u32
    }

    /// Highest observed rate, rounded for display
    pub fn max_fps_int(&self) -> u32 {
        self.max_fps.round() as u32
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn write_index(&self) -> usize {
        self.write_index
    }

    pub fn last_timestamp(&self) -> Option<f64> {
        self.last_timestamp
    }

    /// Raw slots in storage order
    pub fn samples(&self) -> &[f64; BUFFER_SIZE] {
        &self.samples
    }

    /// Slots from oldest to newest
    pub fn chronological(&self) -> impl Iterator<Item = f64> + '_ {
        (0..BUFFER_SIZE).map(move |i| self.samples[(self.write_index + i) % BUFFER_SIZE])
    }

    /// History for the graph, oldest first
    pub fn bars(&self) -> [BarSample; BUFFER_SIZE] {
        let mut bars = [BarSample::new(TARGET_FRAME_MS); BUFFER_SIZE];
        for (bar, ms) in bars.iter_mut().zip(self.chronological()) {
            *bar = BarSample::new(ms);
        }
        bars
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `deltas` after an initial baseline at t=0
    fn feed(sampler: &mut FrameSampler, deltas: &[f64]) -> f64 {
        let mut now = match sampler.last_timestamp() {
            Some(last) => last,
            None => {
                sampler.record_frame(0.0);
                0.0
            }
        };
        for delta in deltas {
            now += delta;
            sampler.record_frame(now);
        }
        now
    }

    #[test]
    fn test_initial_state() {
        let sampler = FrameSampler::new();
        assert_eq!(sampler.write_index(), 0);
        assert_eq!(sampler.sample_count(), 0);
        assert_eq!(sampler.min_fps(), 60.0);
        assert_eq!(sampler.max_fps(), 60.0);
        assert!(sampler.samples().iter().all(|&ms| ms == TARGET_FRAME_MS));
        assert_eq!(sampler.stats().average_fps, 60);
        assert_eq!(sampler.stats().status, Status::Good);
    }

    #[test]
    fn test_first_call_is_rejected() {
        let mut sampler = FrameSampler::new();
        assert!(sampler.record_frame(1234.0).is_none());
        assert_eq!(sampler.sample_count(), 0);
        assert_eq!(sampler.last_timestamp(), Some(1234.0));
    }

    #[test]
    fn test_rejected_deltas_leave_state_untouched() {
        let mut sampler = FrameSampler::new();
        let now = feed(&mut sampler, &[10.0; 70]);
        let before = sampler.clone();

        // zero, negative, and a suspended-tab gap
        for (offset, expected_last) in [(0.0, now), (-5.0, now - 5.0), (600.0, now + 595.0)] {
            let ts = sampler.last_timestamp().unwrap() + offset;
            assert!(sampler.record_frame(ts).is_none());
            assert_eq!(sampler.last_timestamp(), Some(expected_last));
        }

        assert_eq!(sampler.samples(), before.samples());
        assert_eq!(sampler.write_index(), before.write_index());
        assert_eq!(sampler.sample_count(), before.sample_count());
        assert_eq!(sampler.min_fps(), before.min_fps());
        assert_eq!(sampler.max_fps(), before.max_fps());
    }

    #[test]
    fn test_boundary_delta_of_500_is_rejected() {
        let mut sampler = FrameSampler::new();
        sampler.record_frame(0.0);
        assert!(sampler.record_frame(500.0).is_none());
        assert!(sampler.record_frame(999.5).is_some());
    }

    #[test]
    fn test_warmup_gates_extremes() {
        let mut sampler = FrameSampler::new();
        sampler.record_frame(0.0);

        let mut now = 0.0;
        for _ in 0..60 {
            now += 10.0;
            sampler.record_frame(now);
            assert_eq!(sampler.min_fps(), 60.0);
            assert_eq!(sampler.max_fps(), 60.0);
        }

        // 61st accepted sample: 100fps raises the max
        now += 10.0;
        sampler.record_frame(now);
        assert_eq!(sampler.max_fps(), 100.0);
        assert_eq!(sampler.min_fps(), 60.0);

        // a slow frame lowers the min; max does not move back
        now += 40.0;
        sampler.record_frame(now);
        assert_eq!(sampler.min_fps(), 25.0);
        assert_eq!(sampler.max_fps(), 100.0);
    }

    #[test]
    fn test_average_uses_recent_window() {
        let mut sampler = FrameSampler::new();
        let mut deltas = vec![45.0; 50];
        deltas.extend(std::iter::repeat(20.0).take(AVERAGE_WINDOW));
        feed(&mut sampler, &deltas);

        let stats = sampler.stats();
        assert_eq!(stats.average_frame_ms, 20.0);
        assert_eq!(stats.average_fps, 50);
        assert_eq!(stats.status, Status::Warn);
    }

    #[test]
    fn test_average_wraps_around_buffer() {
        let mut sampler = FrameSampler::new();
        // write index ends at 5, so the window spans the wrap
        feed(&mut sampler, &[40.0; BUFFER_SIZE + 5]);
        assert_eq!(sampler.write_index(), 5);
        assert_eq!(sampler.stats().average_frame_ms, 40.0);
        assert_eq!(sampler.stats().average_fps, 25);
        assert_eq!(sampler.stats().status, Status::Bad);
    }

    #[test]
    fn test_early_average_includes_fill_value() {
        let mut sampler = FrameSampler::new();
        feed(&mut sampler, &[36.666_666_666_666_664]);
        // one 36.67ms slot among nineteen 16.67ms slots
        let expected = (19.0 * TARGET_FRAME_MS + 36.666_666_666_666_664) / 20.0;
        assert!((sampler.stats().average_frame_ms - expected).abs() < 1e-9);
        assert_eq!(sampler.stats().average_fps, 57);
    }

    #[test]
    fn test_chronological_order() {
        let mut sampler = FrameSampler::new();
        feed(&mut sampler, &[1.0, 2.0, 3.0]);
        let history: Vec<f64> = sampler.chronological().collect();
        assert_eq!(history.len(), BUFFER_SIZE);
        assert_eq!(&history[BUFFER_SIZE - 3..], &[1.0, 2.0, 3.0]);
        assert_eq!(history[0], TARGET_FRAME_MS);
    }

    #[test]
    fn test_bars_follow_history() {
        let mut sampler = FrameSampler::new();
        feed(&mut sampler, &[12.0, 25.0, 80.0]);
        let bars = sampler.bars();
        assert_eq!(bars[BUFFER_SIZE - 3].status, Status::Good);
        assert_eq!(bars[BUFFER_SIZE - 2].status, Status::Warn);
        assert_eq!(bars[BUFFER_SIZE - 1].status, Status::Bad);
        assert_eq!(bars[BUFFER_SIZE - 1].height_ms, 80.0);
    }

    #[test]
    fn test_rebase_skips_idle_gap() {
        let mut sampler = FrameSampler::new();
        feed(&mut sampler, &[16.0; 5]);
        sampler.rebase(10_000.0);
        assert!(sampler.record_frame(10_016.0).is_some());
        assert_eq!(sampler.sample_count(), 6);
    }
}
