//! Input handling and keybindings.
//!
//! ```text
//! Normal --h/?--> Help       --any key--> Normal
//! Normal --s----> SortMenu   --Enter/Esc--> Normal
//! Normal --f----> FilterEntry --Enter/Esc--> Normal
//! Normal --t/r--> Normal (toggle tree / sort direction)
//! Normal --q----> quit
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::provider::Filter;

use super::state::{
    AppState, FILTER_INPUT_WIDTH, InputMode, NOTICE_DURATION, Notice, SortMenuState,
};

/// Text of the notice shown after a rejected filter.
pub const INVALID_FILTER: &str = "Invalid filter";

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    match state.input_mode {
        InputMode::Normal => handle_normal_mode(state, key),
        InputMode::Help => {
            state.input_mode = InputMode::Normal;
            KeyAction::None
        }
        InputMode::SortMenu => handle_sort_menu(state, key),
        InputMode::FilterEntry => handle_filter_mode(state, key),
    }
}

/// Handles keys on the live table.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('h') | KeyCode::Char('?') => {
            state.input_mode = InputMode::Help;
            KeyAction::None
        }
        KeyCode::Char('t') => {
            state.tree = !state.tree;
            debug!(tree = state.tree, "tree toggled");
            KeyAction::None
        }
        KeyCode::Char('r') => {
            state.sort_reversed = !state.sort_reversed;
            debug!(reversed = state.sort_reversed, "sort direction toggled");
            KeyAction::None
        }
        KeyCode::Char('s') => {
            state.sort_menu = SortMenuState::open(&state.view, state.sort_column);
            state.input_mode = InputMode::SortMenu;
            KeyAction::None
        }
        KeyCode::Char('f') => {
            state.filter_input = state
                .filter
                .as_ref()
                .map(|f| f.to_string())
                .unwrap_or_default();
            state.input_mode = InputMode::FilterEntry;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in the sort field menu.
fn handle_sort_menu(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.sort_menu.up(),
        KeyCode::Down | KeyCode::Char('j') => state.sort_menu.down(),
        KeyCode::Enter => {
            if let Some(column) = state.sort_menu.chosen() {
                state.sort_column = column;
                debug!(column = state.sort_header(), "sort column selected");
            }
            state.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => state.input_mode = InputMode::Normal,
        _ => {}
    }
    KeyAction::None
}

/// Handles keys in the filter entry box.
fn handle_filter_mode(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            // Cancel, keep the active filter
            state.input_mode = InputMode::Normal;
            state.filter_input.clear();
        }
        KeyCode::Enter => submit_filter(state),
        KeyCode::Backspace => {
            state.filter_input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            if state.filter_input.chars().count() < (FILTER_INPUT_WIDTH - 1) as usize {
                state.filter_input.push(c);
            }
        }
        _ => {}
    }
    KeyAction::None
}

/// Validates the typed filter; an invalid one clears the filter and
/// raises a notice.
fn submit_filter(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    let input = std::mem::take(&mut state.filter_input);
    match Filter::parse(&input) {
        Ok(filter) => {
            debug!(filter = ?filter, "filter applied");
            state.filter = filter;
        }
        Err(e) => {
            debug!(error = %e, "filter rejected");
            state.filter = None;
            state.notice = Some(Notice::new(INVALID_FILTER, NOTICE_DURATION));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            let _ = handle_key(state, key(KeyCode::Char(c)));
        }
    }

    fn new_state() -> AppState {
        AppState::new(View::realtime())
    }

    #[test]
    fn quit_on_q() {
        let mut state = new_state();
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::Quit);
    }

    #[test]
    fn quit_on_ctrl_c_in_any_mode() {
        let mut state = new_state();
        state.input_mode = InputMode::FilterEntry;
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handle_key(&mut state, ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut state = new_state();
        let before = (state.tree, state.sort_reversed, state.sort_column);
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('x'))), KeyAction::None);
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), KeyAction::None);
        assert_eq!((state.tree, state.sort_reversed, state.sort_column), before);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn help_opens_and_closes_on_any_key() {
        for opener in ['h', '?'] {
            let mut state = new_state();
            let _ = handle_key(&mut state, key(KeyCode::Char(opener)));
            assert_eq!(state.input_mode, InputMode::Help);

            // 'q' only closes the popup here
            assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
            assert_eq!(state.input_mode, InputMode::Normal);
        }
    }

    #[test]
    fn toggles_tree_and_reverse() {
        let mut state = new_state();
        let _ = handle_key(&mut state, key(KeyCode::Char('t')));
        assert!(!state.tree);
        let _ = handle_key(&mut state, key(KeyCode::Char('t')));
        assert!(state.tree);

        let _ = handle_key(&mut state, key(KeyCode::Char('r')));
        assert!(state.sort_reversed);
        let _ = handle_key(&mut state, key(KeyCode::Char('r')));
        assert!(!state.sort_reversed);
    }

    #[test]
    fn sort_menu_maps_choice_to_column() {
        let mut state = new_state();
        let _ = handle_key(&mut state, key(KeyCode::Char('s')));
        assert_eq!(state.input_mode, InputMode::SortMenu);
        assert_eq!(state.sort_menu.selected, 0);

        // NAME, STATUS, SESSIONS, REQUESTS, NET I/O, PROXY (CRQ TIME is not offered)
        for _ in 0..5 {
            let _ = handle_key(&mut state, key(KeyCode::Down));
        }
        let _ = handle_key(&mut state, key(KeyCode::Enter));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.sort_column, 6);
        assert_eq!(state.sort_header(), "PROXY");
    }

    #[test]
    fn sort_menu_escape_keeps_sort() {
        let mut state = new_state();
        let _ = handle_key(&mut state, key(KeyCode::Char('s')));
        let _ = handle_key(&mut state, key(KeyCode::Char('j')));
        let _ = handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.sort_header(), "NAME");
    }

    #[test]
    fn filter_entry_applies_valid_filter() {
        let mut state = new_state();
        let _ = handle_key(&mut state, key(KeyCode::Char('f')));
        assert_eq!(state.input_mode, InputMode::FilterEntry);

        type_text(&mut state, "name:webx");
        let _ = handle_key(&mut state, key(KeyCode::Backspace));
        let _ = handle_key(&mut state, key(KeyCode::Enter));

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filter.as_ref().map(|f| f.to_string()), Some("name:web".into()));
        assert!(state.notice.is_none());
        assert!(state.filter_input.is_empty());
    }

    #[test]
    fn invalid_filter_resets_and_shows_notice() {
        let mut state = new_state();
        state.filter = Filter::parse("name:web").unwrap();

        let _ = handle_key(&mut state, key(KeyCode::Char('f')));
        assert_eq!(state.filter_input, "name:web");
        for _ in 0..8 {
            let _ = handle_key(&mut state, key(KeyCode::Backspace));
        }
        type_text(&mut state, "xyz");
        let _ = handle_key(&mut state, key(KeyCode::Enter));

        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.filter.is_none());
        assert_eq!(state.notice.as_ref().map(|n| n.text.as_str()), Some(INVALID_FILTER));
    }

    #[test]
    fn empty_filter_clears_without_notice() {
        let mut state = new_state();
        state.filter = Filter::parse("proxy:lb").unwrap();

        let _ = handle_key(&mut state, key(KeyCode::Char('f')));
        state.filter_input.clear();
        type_text(&mut state, "   ");
        let _ = handle_key(&mut state, key(KeyCode::Enter));

        assert!(state.filter.is_none());
        assert!(state.notice.is_none());
    }

    #[test]
    fn filter_escape_keeps_active_filter() {
        let mut state = new_state();
        state.filter = Filter::parse("proxy:lb").unwrap();

        let _ = handle_key(&mut state, key(KeyCode::Char('f')));
        type_text(&mut state, "zzz");
        let _ = handle_key(&mut state, key(KeyCode::Esc));

        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.filter.as_ref().map(|f| f.to_string()), Some("proxy:lb".into()));
    }

    #[test]
    fn filter_input_is_capped_to_box_width() {
        let mut state = new_state();
        let _ = handle_key(&mut state, key(KeyCode::Char('f')));
        type_text(&mut state, &"a".repeat(50));
        assert_eq!(state.filter_input.chars().count(), 29);
    }

    #[test]
    fn typed_q_in_filter_box_does_not_quit() {
        let mut state = new_state();
        let _ = handle_key(&mut state, key(KeyCode::Char('f')));
        assert_eq!(handle_key(&mut state, key(KeyCode::Char('q'))), KeyAction::None);
        assert_eq!(state.filter_input, "q");
    }
}
