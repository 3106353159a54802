//! Overlay widgets — welcome, filter input, result detail, error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// First-run welcome overlay.
pub fn render_welcome(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Welcome to Hindsight ")
        .title_style(theme::accent_bold());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Getting started:", theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled(
            "  1. Press r to trigger an evaluation run on the server",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  2. Browse evaluated results with j/k, pages with h/l",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  3. Press / to filter by stock code",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  4. The performance card updates with each filter and run",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(Span::styled("Press any key to dismiss...", theme::neutral())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Stock-code filter input overlay.
pub fn render_filter(f: &mut Frame, area: Rect, input: &str) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Filter by Code [Enter]apply [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Enter stock code (empty clears the filter):",
            theme::muted(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(input, theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    let para = Paragraph::new(text);
    f.render_widget(para, inner);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for i in start..end {
        let err = &app.error_history[i];
        let is_active = i == app.error_scroll;
        let style = if is_active {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(&err.message, style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(&err.context, theme::muted()),
            ]));
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, inner);
}

/// Detail drill-down overlay for one evaluated result.
pub fn render_detail(f: &mut Frame, area: Rect, app: &AppState, idx: usize) {
    let popup = centered_rect(70, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Result Detail [Esc]close ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let Some(item) = app.results.items.get(idx) else {
        let text = Paragraph::new(Span::styled("Result not found.", theme::muted()));
        f.render_widget(text, inner);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    field(&mut lines, "Code", Span::styled(item.code.clone(), theme::accent()));
    field(
        &mut lines,
        "Analysis date",
        Span::styled(item.analysis_date.to_string(), theme::accent()),
    );
    field(
        &mut lines,
        "Status",
        Span::styled(item.status.label(), theme::neutral()),
    );
    field(
        &mut lines,
        "Outcome",
        Span::styled(
            item.outcome.map(|o| o.label()).unwrap_or("-"),
            theme::outcome_style(item.outcome),
        ),
    );
    field(
        &mut lines,
        "Simulated return",
        match item.simulated_return_pct {
            Some(p) => Span::styled(format!("{p:+.2}%"), theme::return_style(p)),
            None => Span::styled("-", theme::muted()),
        },
    );
    field(
        &mut lines,
        "Direction correct",
        Span::styled(
            match item.direction_correct {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            },
            theme::neutral(),
        ),
    );
    field(
        &mut lines,
        "Stop loss hit",
        Span::styled(if item.stop_loss_hit { "yes" } else { "no" }, theme::neutral()),
    );
    field(
        &mut lines,
        "Take profit hit",
        Span::styled(if item.take_profit_hit { "yes" } else { "no" }, theme::neutral()),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Advice", theme::accent_bold())));
    lines.push(Line::from(Span::styled(item.advice.clone(), theme::muted())));

    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(para, inner);
}

fn field<'a>(lines: &mut Vec<Line<'a>>, label: &str, value: Span<'a>) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>18}: "), theme::muted()),
        value,
    ]));
}
