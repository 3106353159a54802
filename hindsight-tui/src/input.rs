//! Keyboard input dispatch — global keys → overlays → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Filter => {
            handle_filter_overlay(app, key);
            return;
        }
        Overlay::Detail(_) => {
            handle_detail_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Run; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Results; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::Performance; return; }
        KeyCode::Char('4') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('/') | KeyCode::Char('f') => {
            app.overlay = Overlay::Filter;
            app.filter_input = app.filter_code.clone().unwrap_or_default();
            return;
        }
        KeyCode::Char('r') => {
            app.start_run();
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Run => handle_run_key(app, key),
        Panel::Results => handle_results_key(app, key),
        Panel::Performance => {} // display only
        Panel::Help => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_filter_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.overlay = Overlay::None;
            app.filter_input.clear();
        }
        KeyCode::Enter => {
            let code = app.filter_input.trim().to_uppercase();
            app.overlay = Overlay::None;
            app.filter_input.clear();
            if code.is_empty() {
                app.submit_filter(None);
            } else {
                app.submit_filter(Some(code));
            }
        }
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Char(c) => {
            app.filter_input.push(c);
        }
        _ => {}
    }
}

fn handle_detail_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

fn handle_run_key(app: &mut AppState, key: KeyEvent) {
    let setting_count = app.run.setting_count();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.run.cursor + 1 < setting_count {
                app.run.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.run.cursor = app.run.cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => {
            adjust_run_setting(app, -1);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            adjust_run_setting(app, 1);
        }
        KeyCode::Enter => {
            app.start_run();
        }
        _ => {}
    }
}

fn adjust_run_setting(app: &mut AppState, direction: i32) {
    let r = &mut app.run;
    match r.cursor {
        0 => {
            r.eval_window_days =
                (r.eval_window_days as i32 + direction * 5).clamp(5, 365) as u32;
        }
        1 => {
            // Batch limit: None means "server default / no cap".
            let current = r.batch_limit.unwrap_or(0) as i32 + direction * 10;
            r.batch_limit = if current <= 0 { None } else { Some(current as u32) };
        }
        2 => {
            r.force = !r.force;
        }
        _ => {}
    }
}

fn handle_results_key(app: &mut AppState, key: KeyEvent) {
    let item_count = app.results.items.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if item_count > 0 && app.results.cursor + 1 < item_count {
                app.results.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.results.cursor = app.results.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            app.results.cursor = 0;
        }
        KeyCode::Char('G') => {
            app.results.cursor = item_count.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('p') => {
            app.change_page(-1);
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('n') => {
            app.change_page(1);
        }
        KeyCode::Enter => {
            if !app.results.items.is_empty() {
                app.overlay = Overlay::Detail(app.results.cursor);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::WorkerCommand;
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Receiver};

    fn test_app() -> (AppState, Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let app = AppState::new(cmd_tx, resp_rx, PathBuf::from("."));
        (app, cmd_rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits() {
        let (mut app, _rx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn filter_overlay_submits_uppercased_code() {
        let (mut app, rx) = test_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.overlay, Overlay::Filter);

        for c in "aapl".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        handle_key(&mut app, press(KeyCode::Enter));

        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.filter_code.as_deref(), Some("AAPL"));
        // Filter submit queues both fetch families.
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn empty_filter_clears() {
        let (mut app, rx) = test_app();
        app.filter_code = Some("AAPL".into());
        handle_key(&mut app, press(KeyCode::Char('f')));
        app.filter_input.clear();
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(app.filter_code.is_none());
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn run_panel_force_toggle() {
        let (mut app, _rx) = test_app();
        app.active_panel = Panel::Run;
        app.run.cursor = 2;
        assert!(!app.run.force);
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert!(app.run.force);
        handle_key(&mut app, press(KeyCode::Char('h')));
        assert!(!app.run.force);
    }

    #[test]
    fn eval_window_clamps_at_minimum() {
        let (mut app, _rx) = test_app();
        app.active_panel = Panel::Run;
        app.run.cursor = 0;
        for _ in 0..50 {
            handle_key(&mut app, press(KeyCode::Char('h')));
        }
        assert_eq!(app.run.eval_window_days, 5);
    }

    #[test]
    fn welcome_overlay_dismisses_on_any_key() {
        let (mut app, _rx) = test_app();
        app.overlay = Overlay::Welcome;
        handle_key(&mut app, press(KeyCode::Char('x')));
        assert_eq!(app.overlay, Overlay::None);
    }
}
