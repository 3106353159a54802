//! Results table — one server page of evaluated records with pagination footer.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let r = &app.results;
    let mut lines: Vec<Line> = Vec::new();

    // Header
    let filter = app.filter_code.as_deref().unwrap_or("all");
    let mut header = vec![
        Span::styled(format!("Filter: {filter} | "), theme::muted()),
        Span::styled(format!("{} results", r.total), theme::accent()),
    ];
    if r.loading {
        header.push(Span::styled("  loading...", theme::warning()));
    }
    lines.push(Line::from(header));
    lines.push(Line::from(""));

    if r.items.is_empty() {
        lines.push(Line::from(Span::styled(
            if r.loading {
                "Loading results..."
            } else {
                "No results. Trigger a run from the Run panel [r]."
            },
            theme::muted(),
        )));
    } else {
        // Column headers
        lines.push(Line::from(Span::styled(
            format!(
                "{:<11} {:<8} {:>5} {:>7} {:>4} {:>3} {:>3} {:<12} {}",
                "Date", "Code", "Out", "Ret%", "Dir", "SL", "TP", "Status", "Advice"
            ),
            theme::accent_bold(),
        )));

        // Visible rows, window follows the cursor.
        let visible_height = area.height.saturating_sub(5) as usize;
        let start = if visible_height == 0 {
            r.cursor
        } else {
            r.cursor.saturating_sub(visible_height.saturating_sub(1))
        };
        let end = (start + visible_height.max(1)).min(r.items.len());

        for i in start..end {
            let item = &r.items[i];
            let is_cursor = i == r.cursor;

            let style = if is_cursor {
                theme::accent().add_modifier(Modifier::REVERSED)
            } else {
                theme::muted()
            };

            let outcome_style = if is_cursor {
                style
            } else {
                theme::outcome_style(item.outcome)
            };
            let ret_style = if is_cursor {
                style
            } else {
                item.simulated_return_pct
                    .map(theme::return_style)
                    .unwrap_or_else(theme::muted)
            };

            let outcome = item.outcome.map(|o| o.label()).unwrap_or("-");
            let ret = item
                .simulated_return_pct
                .map(|p| format!("{p:>+7.2}"))
                .unwrap_or_else(|| format!("{:>7}", "-"));
            let dir = match item.direction_correct {
                Some(true) => "ok",
                Some(false) => "no",
                None => "-",
            };
            let sl = if item.stop_loss_hit { "x" } else { "." };
            let tp = if item.take_profit_hit { "x" } else { "." };

            lines.push(Line::from(vec![
                Span::styled(format!("{:<11} ", item.analysis_date), style),
                Span::styled(format!("{:<8} ", truncate(&item.code, 8)), style),
                Span::styled(format!("{outcome:>5} "), outcome_style),
                Span::styled(format!("{ret} "), ret_style),
                Span::styled(format!("{dir:>4} "), style),
                Span::styled(format!("{sl:>3} "), style),
                Span::styled(format!("{tp:>3} "), style),
                Span::styled(format!("{:<12} ", item.status.label()), style),
                Span::styled(truncate(&item.advice, 40), style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                format!("page {}/{} (total {})", r.page, r.total_pages(), r.total),
                theme::accent(),
            ),
            Span::styled(
                "  [h/l]page [j/k]scroll [Enter]detail [/]filter",
                theme::muted(),
            ),
        ]));
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("AAPL", 8), "AAPL");
        assert_eq!(truncate("longer-than-max", 8), "longer-.");
        // Multi-byte input must not panic.
        assert_eq!(truncate("매수 추천 유지", 5), "매수 추.");
    }
}
