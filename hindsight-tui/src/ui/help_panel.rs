//! Help panel — keyboard shortcuts.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-4", "Focus panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panel focus forward / back");
    key(&mut lines, "/ or f", "Filter results by stock code");
    key(&mut lines, "r", "Trigger an evaluation run");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Run panel");
    key(&mut lines, "j / k", "Select setting");
    key(&mut lines, "h / l", "Adjust setting value");
    key(&mut lines, "Enter", "Trigger a run with current settings");
    lines.push(Line::from(""));

    section(&mut lines, "Results panel");
    key(&mut lines, "j / k", "Move cursor within the page");
    key(&mut lines, "g / G", "Jump to first / last row");
    key(&mut lines, "h / l (or p / n)", "Previous / next page");
    key(&mut lines, "Enter", "Open result detail");
    lines.push(Line::from(""));

    section(&mut lines, "Notes");
    key(
        &mut lines,
        "",
        "The run uses the active filter code; after it finishes, the",
    );
    key(
        &mut lines,
        "",
        "results list (page 1) and performance card refresh automatically.",
    );

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(
        title.to_string(),
        theme::accent_bold(),
    )));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>18}  "), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
