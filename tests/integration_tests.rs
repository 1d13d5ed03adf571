//! Integration tests for fpsmon

use fpsmon::classifier::Status;
use fpsmon::config::{Config, OverlayOptions, Position};
use fpsmon::graph::GraphLayout;
use fpsmon::host::{Clock, FrameScheduler, LoopScheduler};
use fpsmon::monitor::FpsMonitor;
use fpsmon::sampler::{FrameSampler, BUFFER_SIZE, TARGET_FRAME_MS};

/// Baseline at t=0, then one accepted frame per delta
fn sampler_with(deltas: &[f64]) -> FrameSampler {
    let mut sampler = FrameSampler::new();
    let mut now = 0.0;
    sampler.record_frame(now);
    for delta in deltas {
        now += delta;
        sampler.record_frame(now);
    }
    sampler
}

mod sampler_tests {
    use super::*;

    #[test]
    fn test_steady_sixty_fps() {
        let sampler = sampler_with(&[16.667; 61]);

        let stats = sampler.stats();
        assert_eq!(sampler.sample_count(), 61);
        assert_eq!(stats.average_fps, 60);
        assert_eq!(stats.status, Status::Good);
        assert_eq!(sampler.min_fps_int(), 60);
        assert_eq!(sampler.max_fps_int(), 60);
    }

    #[test]
    fn test_alternating_stress() {
        let deltas: Vec<f64> = (0..200)
            .map(|i| if i % 2 == 0 { 10.0 } else { 40.0 })
            .collect();
        let sampler = sampler_with(&deltas);

        assert_eq!(sampler.sample_count(), 200);
        assert_eq!(sampler.write_index(), 200 % BUFFER_SIZE);
        assert_eq!(sampler.max_fps(), 100.0);
        assert_eq!(sampler.min_fps(), 25.0);

        let history: Vec<f64> = sampler.chronological().collect();
        assert_eq!(history, &deltas[80..]);
    }

    #[test]
    fn test_suspended_tab_gap_is_absorbed() {
        let mut sampler = sampler_with(&[16.0; 30]);
        let before: Vec<f64> = sampler.chronological().collect();
        let last = sampler.last_timestamp().unwrap();

        // five seconds in the background
        assert!(sampler.record_frame(last + 5_000.0).is_none());
        assert_eq!(sampler.chronological().collect::<Vec<_>>(), before);

        // the next frame is measured from the late timestamp, not the old one
        assert!(sampler.record_frame(last + 5_016.0).is_some());
        assert_eq!(sampler.chronological().last(), Some(16.0));
    }

    #[test]
    fn test_regression_shows_within_window() {
        let mut deltas = vec![16.0; 100];
        deltas.extend([50.0; 20]);
        let sampler = sampler_with(&deltas);
        assert_eq!(sampler.stats().average_fps, 20);
        assert_eq!(sampler.stats().status, Status::Bad);
    }
}

mod graph_tests {
    use super::*;

    #[test]
    fn test_graph_from_sampler_history() {
        let sampler = sampler_with(&[10.0, 25.0, 75.0]);
        let layout = GraphLayout::default();
        let bars: Vec<_> = layout.bars(&sampler.bars()).collect();

        assert_eq!(bars.len(), BUFFER_SIZE);
        let newest = bars[BUFFER_SIZE - 1];
        assert_eq!(newest.height, 80.0);
        assert_eq!(newest.status, Status::Bad);
        assert_eq!(bars[BUFFER_SIZE - 2].status, Status::Warn);
        assert_eq!(bars[BUFFER_SIZE - 3].status, Status::Good);

        let fill_height = TARGET_FRAME_MS / 50.0 * 80.0;
        assert!((bars[0].height - fill_height).abs() < 1e-9);
    }
}

mod monitor_tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct SharedClock(Rc<Cell<f64>>);

    impl Clock for SharedClock {
        fn now(&self) -> f64 {
            self.0.get()
        }
    }

    #[test]
    fn test_host_loop_drives_monitor() {
        let clock = SharedClock::default();
        let mut monitor =
            FpsMonitor::new(OverlayOptions::default(), clock.clone(), LoopScheduler::new());

        let mut now = 0.0;
        for _ in 0..90 {
            assert!(monitor.scheduler().pending().is_some());
            now += 20.0;
            clock.0.set(now);
            monitor.on_refresh();
        }

        let report = monitor.report();
        assert_eq!(report.stats.average_fps, 50);
        assert_eq!(report.stats.status, Status::Warn);
        let detail = report.detail.unwrap();
        assert_eq!(detail.min_fps, 50);
        assert_eq!(detail.max_fps, 60);
    }

    #[test]
    fn test_stop_start_cycle() {
        let clock = SharedClock::default();
        let mut monitor =
            FpsMonitor::new(OverlayOptions::default(), clock.clone(), LoopScheduler::new());

        monitor.stop();
        monitor.stop();
        assert!(!monitor.is_running());
        assert_eq!(monitor.scheduler().pending(), None);

        clock.0.set(30_000.0);
        monitor.start();
        assert_eq!(monitor.sampler().last_timestamp(), Some(30_000.0));

        // a bogus first timestamp is dropped without touching history
        let before: Vec<f64> = monitor.sampler().chronological().collect();
        assert!(monitor.tick(29_000.0).is_none());
        assert_eq!(monitor.sampler().chronological().collect::<Vec<_>>(), before);
        assert!(monitor.is_running());
    }

    #[test]
    fn test_scheduler_handles_are_released() {
        let mut scheduler = LoopScheduler::new();
        let handle = scheduler.schedule_next_tick();
        scheduler.cancel(handle);
        assert_eq!(scheduler.pending(), None);

        let clock = SharedClock::default();
        let monitor = FpsMonitor::new(OverlayOptions::default(), clock, scheduler);
        assert!(monitor.scheduler().pending().is_some());
        monitor.destroy();
    }
}

mod ui_tests {
    use super::*;
    use fpsmon::state::AppState;
    use fpsmon::terminal_capabilities::TerminalCapabilities;
    use fpsmon::ui;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn rows(buffer: &Buffer) -> Vec<String> {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    fn draw(state: &AppState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| ui::render(frame, state)).unwrap();
        rows(terminal.backend().buffer())
    }

    fn state_with(overlay: OverlayOptions) -> AppState {
        AppState::new(Config { overlay }, TerminalCapabilities::default())
    }

    #[test]
    fn test_expanded_overlay_shows_stats() {
        let state = state_with(OverlayOptions::default());
        let screen = draw(&state).join("\n");
        assert!(screen.contains("60 FPS"));
        assert!(screen.contains("MIN"));
        assert!(screen.contains("FRAME"));
        assert!(screen.contains("16.7ms"));
    }

    #[test]
    fn test_collapsed_overlay_hides_stats() {
        let state = state_with(OverlayOptions {
            collapsed: true,
            ..OverlayOptions::default()
        });
        let screen = draw(&state).join("\n");
        assert!(screen.contains("FPS"));
        assert!(!screen.contains("MIN"));
    }

    #[test]
    fn test_overlay_follows_position() {
        let state = state_with(OverlayOptions {
            position: Position::BottomLeft,
            collapsed: true,
            ..OverlayOptions::default()
        });
        let screen = draw(&state);
        let row = screen
            .iter()
            .position(|line| line.contains(" FPS"))
            .unwrap();
        assert!(row > 15);
        let col = screen[row].find(" FPS").unwrap();
        assert!(col < 50);
    }

    #[test]
    fn test_hidden_overlay_is_not_drawn() {
        let mut state = state_with(OverlayOptions::default());
        state.toggle_overlay();
        let screen = draw(&state).join("\n");
        assert!(!screen.contains("FPS"));
    }
}
