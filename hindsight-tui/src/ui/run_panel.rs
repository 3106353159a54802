//! Run banner — trigger parameters and the last run's outcome.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let r = &app.run;
    let mut lines: Vec<Line> = Vec::new();

    // Settings row. The cursor marks which one h/l adjusts.
    let limit_label = match r.batch_limit {
        Some(n) => format!("{n}"),
        None => "server default".to_string(),
    };
    let settings = [
        format!("Window: {}d", r.eval_window_days),
        format!("Batch limit: {limit_label}"),
        format!("Force: {}", if r.force { "on" } else { "off" }),
    ];
    let mut spans: Vec<Span> = Vec::new();
    for (i, setting) in settings.iter().enumerate() {
        let style = if i == r.cursor && app.active_panel == crate::app::Panel::Run {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::neutral()
        };
        spans.push(Span::styled(setting.clone(), style));
        spans.push(Span::raw("   "));
    }
    spans.push(Span::styled(
        "[j/k]select [h/l]adjust [Enter/r]run",
        theme::muted(),
    ));
    lines.push(Line::from(spans));

    // Status row: running / last summary / last error.
    if r.in_progress {
        lines.push(Line::from(Span::styled(
            "Evaluation run in progress...",
            theme::warning(),
        )));
    } else if let Some(err) = &r.last_error {
        lines.push(Line::from(vec![
            Span::styled("Last run failed: ", theme::negative()),
            Span::styled(err.as_str(), theme::negative()),
        ]));
    } else if let Some(s) = &r.last_summary {
        lines.push(Line::from(vec![
            Span::styled("Last run: ", theme::muted()),
            Span::styled(format!("{} processed", s.processed), theme::accent()),
            Span::styled(
                format!(
                    ", {} saved, {} completed, {} insufficient, ",
                    s.saved, s.completed, s.insufficient
                ),
                theme::muted(),
            ),
            Span::styled(
                format!("{} errors", s.errors),
                if s.errors > 0 {
                    theme::negative()
                } else {
                    theme::positive()
                },
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "No run triggered this session.",
            theme::muted(),
        )));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}
