use std::io::{self, IsTerminal};

use crate::problem::Severity;

const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy)]
pub struct Colors {
    pub error: &'static str,
    pub warning: &'static str,
    pub info: &'static str,
    pub heading: &'static str,
    /// Matched characters of a completion proposal
    pub highlight: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                error: "\x1b[31m",       // Red
                warning: "\x1b[33m",     // Yellow
                info: "\x1b[36m",        // Cyan
                heading: "\x1b[1m",      // Bold
                highlight: "\x1b[1;32m", // Bold green
                enabled: true,
            }
        } else {
            Self {
                error: "",
                warning: "",
                info: "",
                heading: "",
                highlight: "",
                enabled: false,
            }
        }
    }

    pub fn severity(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled {
            RESET
        } else {
            ""
        }
    }
}

pub fn should_use_colors(force_color: bool, no_color: bool) -> bool {
    // Priority: --no-color > --color > NO_COLOR env > TTY detection
    if no_color {
        return false;
    }
    if force_color {
        return true;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    io::stdout().is_terminal()
}
