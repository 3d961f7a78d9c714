use std::{io::IsTerminal, sync::OnceLock};

use colored::{Color, Colorize};

/// Terminal presentation settings, detected once per process.
#[derive(Clone, Debug)]
pub struct UiStyle {
    pub horizontal: char,
    pub use_color: bool,
    pub color_header: Option<Color>,
    pub color_highlight: Option<Color>,
    pub color_muted: Option<Color>,
}

static STYLE: OnceLock<UiStyle> = OnceLock::new();

pub fn style() -> UiStyle {
    STYLE.get_or_init(UiStyle::detect).clone()
}

impl UiStyle {
    /// Colour only when stdout is a terminal and `NO_COLOR` is unset.
    fn detect() -> Self {
        let use_color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::with_color(use_color)
    }

    pub fn with_color(use_color: bool) -> Self {
        Self {
            horizontal: '-',
            use_color,
            color_header: use_color.then_some(Color::BrightBlue),
            color_highlight: use_color.then_some(Color::Cyan),
            color_muted: use_color.then_some(Color::BrightBlack),
        }
    }

    pub fn horizontal_line(&self, width: usize) -> String {
        self.horizontal.to_string().repeat(width.max(20))
    }

    pub fn header(&self, text: &str) -> String {
        paint(text, self.color_header, true)
    }

    pub fn highlight(&self, text: &str) -> String {
        paint(text, self.color_highlight, true)
    }

    pub fn muted(&self, text: &str) -> String {
        paint(text, self.color_muted, false)
    }
}

fn paint(text: &str, color: Option<Color>, bold: bool) -> String {
    match (color, bold) {
        (Some(color), true) => text.color(color).bold().to_string(),
        (Some(color), false) => text.color(color).to_string(),
        (None, _) => text.to_string(),
    }
}
