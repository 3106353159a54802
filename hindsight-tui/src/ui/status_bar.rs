//! Bottom status bar — last status message, loading indicators, key hints.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Run 2:Results 3:Performance 4:Help  /:filter r:run e:errors q:quit",
        theme::muted(),
    ));

    if app.run.in_progress {
        spans.push(Span::styled(" | run...", theme::warning()));
    }
    if app.results.loading {
        spans.push(Span::styled(" | results...", theme::warning()));
    }
    if app.performance.loading {
        spans.push(Span::styled(" | perf...", theme::warning()));
    }

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
