//! Performance side panel — aggregate metric cards, overall and per-code.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use hindsight_core::PerformanceMetrics;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let p = &app.performance;
    let mut lines: Vec<Line> = Vec::new();

    if p.loading && !p.loaded_once {
        lines.push(Line::from(Span::styled(
            "Loading performance...",
            theme::warning(),
        )));
        let para = Paragraph::new(lines);
        f.render_widget(para, area);
        return;
    }

    lines.push(Line::from(Span::styled("Overall", theme::accent_bold())));
    match &p.overall {
        Some(m) => metric_lines(&mut lines, m),
        None => lines.push(Line::from(Span::styled(
            "No data yet — trigger a run [r].",
            theme::muted(),
        ))),
    }

    if let Some((code, m)) = &p.stock {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            code.as_str(),
            theme::accent_bold(),
        )));
        metric_lines(&mut lines, m);
    } else if app.filter_code.is_some() && p.loaded_once {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{}: no evaluated results yet.",
                app.filter_code.as_deref().unwrap_or("")
            ),
            theme::muted(),
        )));
    }

    if p.loading {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("refreshing...", theme::warning())));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn metric_lines(lines: &mut Vec<Line>, m: &PerformanceMetrics) {
    lines.push(row(
        "Evaluated",
        format!("{} / {}", m.completed, m.total),
        theme::neutral(),
    ));
    lines.push(row(
        "Accuracy",
        format!("{:.1}%", m.accuracy * 100.0),
        theme::win_rate_style(m.accuracy),
    ));
    lines.push(row(
        "Win rate",
        format!("{:.1}%", m.win_rate * 100.0),
        theme::win_rate_style(m.win_rate),
    ));
    lines.push(row(
        "Avg return",
        format!("{:+.2}%", m.avg_return_pct),
        theme::return_style(m.avg_return_pct),
    ));
    lines.push(row(
        "Avg win / loss",
        format!("{:+.2}% / {:+.2}%", m.avg_win_return_pct, m.avg_loss_return_pct),
        theme::neutral(),
    ));
    lines.push(row(
        "W/L/N",
        format!("{} / {} / {}", m.wins, m.losses, m.neutrals),
        theme::neutral(),
    ));
    lines.push(row(
        "SL / TP hit",
        format!(
            "{:.0}% / {:.0}%",
            m.stop_loss_rate * 100.0,
            m.take_profit_rate * 100.0
        ),
        theme::neutral(),
    ));
}

fn row(label: &str, value: String, value_style: ratatui::style::Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<15}"), theme::muted()),
        Span::styled(value, value_style),
    ])
}
