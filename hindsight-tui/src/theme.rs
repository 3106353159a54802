//! Color tokens — neon accents on a dark terminal background.
//!
//! Style helpers shared by all panels so the palette stays consistent:
//! cyan for focus/accents, green for wins, pink for losses, orange for
//! warnings, steel blue for muted text.

use ratatui::style::{Color, Modifier, Style};

use hindsight_core::Outcome;

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Color for a backtest outcome.
pub fn outcome_style(outcome: Option<Outcome>) -> Style {
    match outcome {
        Some(Outcome::Win) => positive(),
        Some(Outcome::Loss) => negative(),
        Some(Outcome::Neutral) => neutral(),
        None => muted(),
    }
}

/// Color for a simulated return percentage.
pub fn return_style(pct: f64) -> Style {
    if pct >= 0.0 {
        positive()
    } else {
        negative()
    }
}

/// Color for a win rate fraction.
pub fn win_rate_style(win_rate: f64) -> Style {
    match win_rate {
        w if w >= 0.7 => positive(),
        w if w >= 0.5 => accent(),
        w if w >= 0.4 => neutral(),
        _ => warning(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_colors() {
        assert_eq!(outcome_style(Some(Outcome::Win)).fg, Some(POSITIVE));
        assert_eq!(outcome_style(Some(Outcome::Loss)).fg, Some(NEGATIVE));
        assert_eq!(outcome_style(Some(Outcome::Neutral)).fg, Some(NEUTRAL));
        assert_eq!(outcome_style(None).fg, Some(MUTED));
    }

    #[test]
    fn return_colors() {
        assert_eq!(return_style(2.5).fg, Some(POSITIVE));
        assert_eq!(return_style(-0.1).fg, Some(NEGATIVE));
        assert_eq!(return_style(0.0).fg, Some(POSITIVE));
    }

    #[test]
    fn win_rate_colors() {
        assert_eq!(win_rate_style(0.75).fg, Some(POSITIVE));
        assert_eq!(win_rate_style(0.55).fg, Some(ACCENT));
        assert_eq!(win_rate_style(0.45).fg, Some(NEUTRAL));
        assert_eq!(win_rate_style(0.30).fg, Some(WARNING));
    }
}
