use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub heading: Style,
    pub good: Style,
    pub bad: Style,
    pub caution: Style,
    pub accent: Style,
    pub faint: Style,
}

impl Theme {
    /// Colors only on a terminal, and never when `NO_COLOR` is set
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if no_color || !console::Term::stdout().is_term() {
            Self::plain()
        } else {
            Self::colored()
        }
    }

    pub fn colored() -> Self {
        Self {
            heading: Style::new().cyan().bold(),
            good: Style::new().green().bold(),
            bad: Style::new().red().bold(),
            caution: Style::new().yellow(),
            accent: Style::new().bright_yellow(),
            faint: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            heading: Style::new(),
            good: Style::new(),
            bad: Style::new(),
            caution: Style::new(),
            accent: Style::new(),
            faint: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
