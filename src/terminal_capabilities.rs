//! Terminal capability detection
//!
//! Decides how palette colors and graph cells are emitted. Detection reads
//! environment variables through a lookup function so it can be exercised
//! without touching the process environment.

use crossterm::terminal;
use std::env;

/// Level of color support in the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSupport {
    /// No color support
    NoColor,
    /// 16 basic colors
    Color16,
    /// 256 color palette
    Color256,
    /// Full 24-bit RGB (TrueColor)
    #[default]
    TrueColor,
}

impl ColorSupport {
    pub fn name(&self) -> &'static str {
        match self {
            ColorSupport::NoColor => "None",
            ColorSupport::Color16 => "16 Colors",
            ColorSupport::Color256 => "256 Colors",
            ColorSupport::TrueColor => "True Color",
        }
    }
}

/// What the overlay painter may rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    pub color_support: ColorSupport,
    /// Braille cells render correctly
    pub unicode: bool,
    pub size: (u16, u16),
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            color_support: ColorSupport::TrueColor,
            unicode: true,
            size: (80, 24),
        }
    }
}

/// Detect terminal capabilities from the process environment
pub fn detect_capabilities() -> TerminalCapabilities {
    let lookup = |key: &str| env::var(key).ok();
    TerminalCapabilities {
        color_support: detect_color_support(lookup),
        unicode: detect_unicode(lookup),
        size: terminal::size().unwrap_or((80, 24)),
    }
}

/// Detect the level of color support
pub fn detect_color_support<F>(lookup: F) -> ColorSupport
where
    F: Fn(&str) -> Option<String>,
{
    // NO_COLOR disables colors regardless of anything else
    if lookup("NO_COLOR").is_some() {
        return ColorSupport::NoColor;
    }

    let colorterm = lookup("COLORTERM").map(|v| v.to_lowercase());
    if let Some(colorterm) = &colorterm {
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return ColorSupport::TrueColor;
        }
    }

    if let Some(term) = lookup("TERM").map(|v| v.to_lowercase()) {
        if ["kitty", "alacritty", "iterm", "vte", "256color"]
            .iter()
            .any(|hint| term.contains(hint))
        {
            return if colorterm.is_some() {
                ColorSupport::TrueColor
            } else {
                ColorSupport::Color256
            };
        }

        if term.contains("xterm") {
            return ColorSupport::Color16;
        }

        if term.contains("screen") || term.contains("tmux") {
            return ColorSupport::Color256;
        }

        if term.contains("linux") || term.contains("console") || term == "dumb" {
            return ColorSupport::Color16;
        }
    }

    if lookup("WT_SESSION").is_some() {
        return ColorSupport::TrueColor;
    }

    ColorSupport::Color256
}

/// Whether the locale advertises UTF-8
pub fn detect_unicode<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("WT_SESSION").is_some() {
        return true;
    }

    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .find_map(|key| lookup(key).filter(|v| !v.is_empty()))
        .map(|v| {
            let v = v.to_uppercase();
            v.contains("UTF-8") || v.contains("UTF8")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_no_color_wins() {
        let lookup = env_of(&[("NO_COLOR", "1"), ("COLORTERM", "truecolor")]);
        assert_eq!(detect_color_support(lookup), ColorSupport::NoColor);
    }

    #[test]
    fn test_colorterm_truecolor() {
        let lookup = env_of(&[("COLORTERM", "24bit"), ("TERM", "xterm")]);
        assert_eq!(detect_color_support(lookup), ColorSupport::TrueColor);
    }

    #[test]
    fn test_term_hints() {
        assert_eq!(
            detect_color_support(env_of(&[("TERM", "xterm-256color")])),
            ColorSupport::Color256
        );
        assert_eq!(
            detect_color_support(env_of(&[("TERM", "linux")])),
            ColorSupport::Color16
        );
        assert_eq!(detect_color_support(env_of(&[])), ColorSupport::Color256);
    }

    #[test]
    fn test_unicode_from_locale() {
        assert!(detect_unicode(env_of(&[("LANG", "en_US.UTF-8")])));
        assert!(!detect_unicode(env_of(&[("LANG", "C")])));
        // LC_ALL takes precedence over LANG
        assert!(!detect_unicode(env_of(&[("LC_ALL", "C"), ("LANG", "en_US.UTF-8")])));
        assert!(!detect_unicode(env_of(&[])));
    }

    #[test]
    fn test_capabilities_default() {
        let caps = TerminalCapabilities::default();
        assert_eq!(caps.color_support, ColorSupport::TrueColor);
        assert!(caps.unicode);
    }
}
