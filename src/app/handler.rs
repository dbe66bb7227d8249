//! Input handling: maps key/mouse events to page interactions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use page_motion::behaviors::{drawer, footer_accordion, submenu};
use page_motion::config::{Action, KeyBind};
use page_motion::dom::env::Environment;
use page_motion::dom::signal::Signal;

use super::state::{ActiveView, AppState};
use crate::ui::layout::AppLayout;
use crate::ui::page_view;

/// Total selectable rows in the controls popup (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key),
        ActiveView::Controls if state.awaiting_rebind => handle_rebind_key(state, key),
        ActiveView::Controls => handle_controls_key(state, key),
    }
}

// ── Page view (configurable bindings) ───────────────────────────

fn handle_page_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    state.status_message = None;
    apply_action(state, action);
}

pub fn apply_action(state: &mut AppState, action: Action) {
    let step = state.config.scroll_step_px;
    let page_step = state.page.viewport().height * 0.9;

    match action {
        Action::ScrollUp => state.scroll_by(-step),
        Action::ScrollDown => state.scroll_by(step),
        Action::PageUp => state.scroll_by(-page_step),
        Action::PageDown => state.scroll_by(page_step),
        Action::Top => state.scroll_to(0.0),
        Action::ToggleDrawer => state.click_first(drawer::TOGGLE_SELECTOR),
        Action::ToggleSubmenu => state.tap_next_submenu(submenu::TRIGGER_SELECTOR),
        Action::NextFooterItem => state.open_next_footer_item(footer_accordion::ITEM_SELECTOR),
        Action::RollNavLink => state.hover_next_nav_link(),
        Action::Dismiss => state.dispatch(Signal::KeyDown {
            key: "Escape".into(),
        }),
        Action::ToggleMobile => state.toggle_mobile(),
        Action::ToggleReducedMotion => state.toggle_reduced_motion(),
        Action::ToggleTouch => state.toggle_touch(),
        Action::ShowControls => {
            state.active_view = ActiveView::Controls;
            state.controls_selected = 0;
        }
        Action::Quit => state.should_quit = true,
    }
}

// ── Controls popup (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_bindings();
                persist(state);
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                persist(state);
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    let Some(&action) = Action::ALL.get(state.controls_selected) else {
        state.awaiting_rebind = false;
        return;
    };
    state.config.add_binding(action, KeyBind::from_key_event(key));
    persist(state);
    state.awaiting_rebind = false;
}

fn persist(state: &mut AppState) {
    if let Err(err) = state.config.save_to(&state.config_path) {
        tracing::warn!(%err, path = %state.config_path.display(), "could not save config");
        state.status_message = Some(format!("config not saved: {err}"));
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  `area` is the full terminal area.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, area: Rect) {
    if state.active_view != ActiveView::Page {
        return;
    }
    let layout = AppLayout::from_area(area);
    let step = state.config.scroll_step_px;

    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_by(step),
        MouseEventKind::ScrollUp => state.scroll_by(-step),
        MouseEventKind::Down(MouseButton::Left) => {
            let inner = page_view::inner_area(layout.page_area);
            match page_view::element_at(&state.page, inner, mouse.column, mouse.row) {
                Some(target) => state.click(target),
                None => state.click(state.page.root()),
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_motion::config::AppConfig;

    fn state() -> AppState {
        let dir = std::env::temp_dir().join(format!("page-motion-test-{}", std::process::id()));
        let mut s = AppState::new(AppConfig::default(), dir.join("config.toml"));
        s.start(false, false);
        s
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_scroll_keys_move_page() {
        let mut s = state();
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Char('j'));
        assert_eq!(s.page.scroll_y(), 96.0);
        press(&mut s, KeyCode::Home);
        assert_eq!(s.page.scroll_y(), 0.0);
    }

    #[test]
    fn test_controls_popup_opens_and_closes() {
        let mut s = state();
        press(&mut s, KeyCode::Char('?'));
        assert_eq!(s.active_view, ActiveView::Controls);
        press(&mut s, KeyCode::Down);
        assert_eq!(s.controls_selected, 1);
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.active_view, ActiveView::Page);
    }

    #[test]
    fn test_rebind_escape_cancels() {
        let mut s = state();
        press(&mut s, KeyCode::Char('?'));
        press(&mut s, KeyCode::Enter);
        assert!(s.awaiting_rebind);
        press(&mut s, KeyCode::Esc);
        assert!(!s.awaiting_rebind);
        assert_eq!(s.active_view, ActiveView::Controls);
    }

    #[test]
    fn test_dismiss_closes_open_submenu() {
        let mut s = state();
        s.toggle_touch();
        press(&mut s, KeyCode::Char('s'));
        let item = s.page.query(submenu::ITEM_SELECTOR).unwrap();
        assert!(s.page.has_class(item, submenu::OPEN_CLASS));
        press(&mut s, KeyCode::Esc);
        assert!(!s.page.has_class(item, submenu::OPEN_CLASS));
    }
}
