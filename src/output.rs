//! # Output Configuration
//!
//! Controls how the CLI reports progress: with emoji and colour on capable
//! terminals, with plain bracketed tags everywhere else.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use solution_gen::output::{OutputConfig, Status};
//!
//! let out = OutputConfig::from_env_and_flag("auto");
//! println!("{} Generating solution...", out.marker(Status::Scan));
//! ```

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

/// The kind of a progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Scan,
    Ok,
    Warn,
    Err,
    Write,
    Info,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Scan => "🔍",
            Status::Ok => "✅",
            Status::Warn => "⚠️",
            Status::Err => "❌",
            Status::Write => "📝",
            Status::Info => "📊",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Status::Scan => "[SCAN]",
            Status::Ok => "[OK]",
            Status::Warn => "[WARN]",
            Status::Err => "[ERR]",
            Status::Write => "[WRITE]",
            Status::Info => "[INFO]",
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // presence alone disables, even when empty
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// The line prefix for a status: an emoji with colour, a tag without.
    pub fn marker(&self, status: Status) -> &'static str {
        if self.use_color {
            status.emoji()
        } else {
            status.tag()
        }
    }

    /// Highlights a value (a path, an id) when colours are enabled.
    pub fn highlight(&self, value: impl std::fmt::Display) -> String {
        if self.use_color {
            console::style(value).bold().cyan().force_styling(true).to_string()
        } else {
            value.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
