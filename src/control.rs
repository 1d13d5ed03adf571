//! Control protocol
//!
//! Two JSON messages drive a host that owns at most one overlay:
//! `{"action":"toggle"}` creates or destroys it, `{"action":"status"}` asks
//! whether it exists. Both are answered with `{"active":bool}`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{OverlayOptions, Position};
use crate::error::{MonitorError, Result};
use crate::host::{Clock, FrameScheduler};
use crate::monitor::FpsMonitor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ControlMessage {
    Toggle,
    Status,
}

impl ControlMessage {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| MonitorError::Protocol(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlResponse {
    pub active: bool,
}

/// Holder for the single overlay a host may show
///
/// `make_host` supplies a fresh clock and scheduler each time the overlay is
/// shown. A `toggle` request always opens it top-right and expanded; only
/// `inject_styles` comes from the slot's options.
pub struct MonitorSlot<C, S, F>
where
    C: Clock,
    S: FrameScheduler,
    F: FnMut() -> (C, S),
{
    monitor: Option<FpsMonitor<C, S>>,
    options: OverlayOptions,
    make_host: F,
}

impl<C, S, F> MonitorSlot<C, S, F>
where
    C: Clock,
    S: FrameScheduler,
    F: FnMut() -> (C, S),
{
    /// An empty slot; nothing is shown until the first `toggle`
    pub fn new(options: OverlayOptions, make_host: F) -> Self {
        Self {
            monitor: None,
            options,
            make_host,
        }
    }

    pub fn handle(&mut self, message: ControlMessage) -> ControlResponse {
        match message {
            ControlMessage::Toggle => self.toggle_with(OverlayOptions {
                position: Position::TopRight,
                collapsed: false,
                ..self.options
            }),
            ControlMessage::Status => ControlResponse {
                active: self.is_active(),
            },
        }
    }

    /// Hide the overlay, or show it with `options`
    pub fn toggle_with(&mut self, options: OverlayOptions) -> ControlResponse {
        if let Some(monitor) = self.monitor.take() {
            monitor.destroy();
            info!("overlay hidden");
        } else {
            let (clock, scheduler) = (self.make_host)();
            self.monitor = Some(FpsMonitor::new(options, clock, scheduler));
            info!(position = %options.position, collapsed = options.collapsed, "overlay shown");
        }
        ControlResponse {
            active: self.is_active(),
        }
    }

    /// Parse a JSON request and return the JSON reply
    pub fn handle_json(&mut self, text: &str) -> Result<String> {
        let message = ControlMessage::from_json(text)?;
        Ok(serde_json::to_string(&self.handle(message))?)
    }

    pub fn is_active(&self) -> bool {
        self.monitor.is_some()
    }

    pub fn monitor(&self) -> Option<&FpsMonitor<C, S>> {
        self.monitor.as_ref()
    }

    pub fn monitor_mut(&mut self) -> Option<&mut FpsMonitor<C, S>> {
        self.monitor.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::LoopScheduler;

    struct FixedClock(f64);

    impl Clock for FixedClock {
        fn now(&self) -> f64 {
            self.0
        }
    }

    fn slot() -> MonitorSlot<FixedClock, LoopScheduler, impl FnMut() -> (FixedClock, LoopScheduler)>
    {
        MonitorSlot::new(OverlayOptions::default(), || {
            (FixedClock(0.0), LoopScheduler::new())
        })
    }

    #[test]
    fn test_message_parsing() {
        assert_eq!(
            ControlMessage::from_json(r#"{"action":"toggle"}"#).unwrap(),
            ControlMessage::Toggle
        );
        assert_eq!(
            ControlMessage::from_json(r#"{"action":"status"}"#).unwrap(),
            ControlMessage::Status
        );
        assert!(matches!(
            ControlMessage::from_json(r#"{"action":"reload"}"#),
            Err(MonitorError::Protocol(_))
        ));
        assert!(ControlMessage::from_json("not json").is_err());
    }

    #[test]
    fn test_toggle_cycle() {
        let mut slot = slot();
        assert_eq!(slot.handle(ControlMessage::Status), ControlResponse { active: false });
        assert_eq!(slot.handle(ControlMessage::Toggle), ControlResponse { active: true });
        assert!(slot.monitor().unwrap().is_running());
        assert_eq!(slot.handle(ControlMessage::Status), ControlResponse { active: true });
        assert_eq!(slot.handle(ControlMessage::Toggle), ControlResponse { active: false });
        assert!(slot.monitor().is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let mut slot = slot();
        assert_eq!(
            slot.handle_json(r#"{"action":"toggle"}"#).unwrap(),
            r#"{"active":true}"#
        );
        assert_eq!(
            slot.handle_json(r#"{"action":"status"}"#).unwrap(),
            r#"{"active":true}"#
        );
        assert!(slot.handle_json(r#"{"action":"explode"}"#).is_err());
        assert!(slot.is_active());
    }

    #[test]
    fn test_toggle_opens_top_right_expanded() {
        let options = OverlayOptions {
            position: Position::BottomLeft,
            collapsed: true,
            inject_styles: false,
        };
        let mut slot = MonitorSlot::new(options, || (FixedClock(0.0), LoopScheduler::new()));

        slot.handle(ControlMessage::Toggle);
        let monitor = slot.monitor().unwrap();
        assert_eq!(monitor.position(), Position::TopRight);
        assert!(!monitor.collapsed());
    }

    #[test]
    fn test_toggle_with_uses_given_options() {
        let options = OverlayOptions {
            position: Position::BottomLeft,
            collapsed: true,
            ..OverlayOptions::default()
        };
        let mut slot = slot();

        assert_eq!(slot.toggle_with(options), ControlResponse { active: true });
        let monitor = slot.monitor().unwrap();
        assert_eq!(monitor.position(), Position::BottomLeft);
        assert!(monitor.collapsed());

        assert_eq!(slot.toggle_with(options), ControlResponse { active: false });
        assert!(!slot.is_active());
    }
}
