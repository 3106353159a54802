//! Top-level UI layout — run banner, results table, performance side panel,
//! one-line status bar. Help replaces the dashboard body when active.

pub mod help_panel;
pub mod overlays;
pub mod performance_panel;
pub mod results_panel;
pub mod run_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    if app.active_panel == Panel::Help {
        draw_bordered(f, main_area, app, Panel::Help, help_panel::render);
    } else {
        draw_dashboard(f, main_area, app);
    }

    status_bar::render(f, status_area, app);

    // Overlays on top.
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::Filter => overlays::render_filter(f, main_area, &app.filter_input),
        Overlay::Detail(idx) => overlays::render_detail(f, main_area, app, *idx),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// The three always-visible views: run banner on top, results table and
/// performance card side by side below.
fn draw_dashboard(f: &mut Frame, area: Rect, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    draw_bordered(f, rows[0], app, Panel::Run, run_panel::render);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);

    draw_bordered(f, body[0], app, Panel::Results, results_panel::render);
    draw_bordered(f, body[1], app, Panel::Performance, performance_panel::render);
}

fn draw_bordered(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    panel: Panel,
    render: fn(&mut Frame, Rect, &AppState),
) {
    let is_active = app.active_panel == panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_active))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(is_active));

    let inner = block.inner(area);
    f.render_widget(block, area);
    render(f, inner, app);
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
