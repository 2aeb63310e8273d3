use std::io::{self, IsTerminal};

const RESET: &str = "\x1b[0m";

/// ANSI styles used by the conflict report
#[derive(Clone, Copy)]
pub struct Colors {
    pub conflict: &'static str,
    pub combo: &'static str,
    pub clean: &'static str,
    pub dim: &'static str,
    pub warning: &'static str,
    enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        if enabled {
            Self {
                conflict: "\x1b[31m", // Red
                combo: "\x1b[1;36m",  // Bold cyan
                clean: "\x1b[32m",    // Green
                dim: "\x1b[2m",
                warning: "\x1b[33m",  // Yellow
                enabled: true,
            }
        } else {
            Self {
                conflict: "",
                combo: "",
                clean: "",
                dim: "",
                warning: "",
                enabled: false,
            }
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
