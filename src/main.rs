//! Main entry point for the fpsmon demo host
//!
//! Run with:  `RUST_LOG=debug fpsmon --position bottom-left`
//! Logs go to `fpsmon.log` in the data directory, never to the terminal.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::{self, File},
    io::{self, Stdout},
    panic,
    path::PathBuf,
    sync::Mutex,
    time::Instant,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fpsmon::{
    config::{Config, Position},
    input::handle_event,
    state::AppState,
    terminal_capabilities::detect_capabilities,
    ui,
};

fn main() -> Result<()> {
    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    if let Err(e) = init_logging() {
        eprintln!("Logging disabled: {:#}", e);
    }
    info!("fpsmon v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    let write_config = apply_args(&mut config, std::env::args().skip(1))?;

    if write_config {
        config.save()?;
        println!("Wrote {}", Config::config_path()?.display());
        return Ok(());
    }

    let capabilities = detect_capabilities();
    info!(
        colors = capabilities.color_support.name(),
        unicode = capabilities.unicode,
        position = %config.overlay.position,
        "terminal detected"
    );

    let mut app_state = AppState::new(config, capabilities);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app_state);
    cleanup_terminal(terminal)?;

    info!(frames = app_state.frames_drawn, "fpsmon exiting");
    result
}

/// Simple CLI parsing; flags override the config file
///
/// Returns `true` when `--write-config` was given.
fn apply_args(config: &mut Config, args: impl IntoIterator<Item = String>) -> Result<bool> {
    let mut write_config = false;
    let mut iter = args.into_iter();
    while let Some(a) = iter.next() {
        match a.as_str() {
            "--position" => match iter.next() {
                Some(p) => config.overlay.position = p.parse::<Position>()?,
                None => warn!("--position needs a value, keeping '{}'", config.overlay.position),
            },
            "--collapsed" => config.overlay.collapsed = true,
            "--expanded" => config.overlay.collapsed = false,
            "--no-styles" => config.overlay.inject_styles = false,
            "--write-config" => write_config = true,
            other => warn!("Ignoring unknown argument '{}'", other),
        }
    }
    Ok(write_config)
}

/// Send tracing output to a log file; the terminal belongs to the TUI
fn init_logging() -> Result<()> {
    let dir = ProjectDirs::from("com", "fpsmon", "fpsmon")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let path = dir.join("fpsmon.log");
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Set up the terminal for TUI rendering
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn cleanup_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main loop - one iteration is one refresh of the host
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app_state: &mut AppState,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();
        let frame_duration = app_state.workload.next_frame_duration();

        terminal.draw(|frame| ui::render(frame, app_state))?;

        // Wait out the rest of the frame budget, handling input as it comes
        loop {
            let timeout = frame_duration.saturating_sub(frame_start.elapsed());
            if timeout.is_zero() || !event::poll(timeout)? {
                break;
            }
            let event = event::read()?;
            if let Event::Resize(width, height) = event {
                app_state.capabilities.size = (width, height);
            }
            handle_event(event, app_state)?;
            if app_state.should_quit {
                break;
            }
        }

        app_state.on_frame();

        if app_state.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        let write = apply_args(
            &mut config,
            args(&["--position", "bottom-left", "--collapsed", "--no-styles"]),
        )
        .unwrap();
        assert!(!write);
        assert_eq!(config.overlay.position, Position::BottomLeft);
        assert!(config.overlay.collapsed);
        assert!(!config.overlay.inject_styles);
    }

    #[test]
    fn test_position_without_value_keeps_config() {
        let mut config = Config::default();
        config.overlay.position = Position::TopLeft;
        let write = apply_args(&mut config, args(&["--write-config", "--position"])).unwrap();
        assert!(write);
        assert_eq!(config.overlay.position, Position::TopLeft);
    }

    #[test]
    fn test_bad_position_is_an_error() {
        let mut config = Config::default();
        assert!(apply_args(&mut config, args(&["--position", "middle"])).is_err());
    }
}
