//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only the code and modifiers take part in the lookup, so press, repeat
    /// and keyboard-state flags reported by the terminal are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Row cursor
        keys.bind(KeyCode::Char('j'), none, KeyAction::CursorDown);
        keys.bind(KeyCode::Down, none, KeyAction::CursorDown);
        keys.bind(KeyCode::Char('k'), none, KeyAction::CursorUp);
        keys.bind(KeyCode::Up, none, KeyAction::CursorUp);

        // Checkboxes
        keys.bind(KeyCode::Char(' '), none, KeyAction::ToggleRow);
        keys.bind(KeyCode::Char('a'), none, KeyAction::TogglePage);
        keys.bind(KeyCode::Char('s'), none, KeyAction::OpenSelectCount);

        // Paginator
        keys.bind(KeyCode::Char('l'), none, KeyAction::NextPage);
        keys.bind(KeyCode::Right, none, KeyAction::NextPage);
        keys.bind(KeyCode::Char('n'), none, KeyAction::NextPage);
        keys.bind(KeyCode::Char('h'), none, KeyAction::PrevPage);
        keys.bind(KeyCode::Left, none, KeyAction::PrevPage);
        keys.bind(KeyCode::Char('p'), none, KeyAction::PrevPage);
        keys.bind(KeyCode::Char('g'), none, KeyAction::FirstPage);
        keys.bind(KeyCode::Home, none, KeyAction::FirstPage);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::LastPage);
        keys.bind(KeyCode::Char('G'), none, KeyAction::LastPage);
        keys.bind(KeyCode::End, none, KeyAction::LastPage);
        keys.bind(KeyCode::Char('r'), none, KeyAction::Reload);

        // Application
        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    #[test]
    fn default_bindings_cover_paginator() {
        let keys = KeyBindings::default();
        let next = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        let prev = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE);
        assert_eq!(keys.get(next), Some(KeyAction::NextPage));
        assert_eq!(keys.get(prev), Some(KeyAction::PrevPage));
    }

    #[test]
    fn shift_g_maps_to_last_page() {
        let keys = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(keys.get(key), Some(KeyAction::LastPage));
    }

    #[test]
    fn ctrl_c_quits() {
        let keys = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keys.get(key), Some(KeyAction::Quit));
    }

    #[test]
    fn lookup_ignores_event_kind_and_state() {
        let keys = KeyBindings::default();
        let key = KeyEvent::new_with_kind_and_state(
            KeyCode::Char(' '),
            KeyModifiers::NONE,
            KeyEventKind::Repeat,
            KeyEventState::CAPS_LOCK,
        );
        assert_eq!(keys.get(key), Some(KeyAction::ToggleRow));
    }

    #[test]
    fn unbound_key_returns_none() {
        let keys = KeyBindings::default();
        let key = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(keys.get(key), None);
    }
}
