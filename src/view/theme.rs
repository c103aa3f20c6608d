use crate::error::AppError;
use colored::{Color, Colorize};
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Colour for headings and highlighted values.
    fn accent(&self) -> Color {
        match self {
            Theme::Dark => Color::Cyan,
            Theme::Light => Color::Blue,
        }
    }

    /// Colour for secondary text such as units and placeholders.
    fn muted(&self) -> Color {
        match self {
            Theme::Dark => Color::BrightBlack,
            Theme::Light => Color::Black,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(AppError::Config(format!(
                "Unknown theme '{}' (expected dark or light)",
                other
            ))),
        }
    }
}

/// Presentation settings passed to every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub theme: Theme,
    pub colorize: bool,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            colorize: true,
        }
    }
}

impl RenderContext {
    pub fn new(theme: Theme, colorize: bool) -> Self {
        Self { theme, colorize }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            theme: Theme::Dark,
            colorize: false,
        }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.colorize {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.colorize {
            text.color(self.theme.accent()).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(text, self.theme.accent())
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, self.theme.muted())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    /// A two-cell block in the given `#rrggbb` colour. Falls back to the hex code when
    /// colour is off or the code does not parse.
    pub fn swatch(&self, hex: &str) -> String {
        match (self.colorize, hex_rgb(hex)) {
            (true, Some((r, g, b))) => "██".truecolor(r, g, b).to_string(),
            _ => hex.to_string(),
        }
    }

    /// An empty table styled for this context.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        if self.colorize {
            table.load_preset(UTF8_FULL);
        } else {
            table.load_preset(ASCII_MARKDOWN).force_no_tty();
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

/// Parses `#rrggbb`.
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
