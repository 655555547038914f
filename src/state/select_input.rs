//! "Select first N rows" input handling (pure state transitions).
//!
//! The popover holds raw text; it is only parsed on submit so that
//! non-numeric input can be reported rather than silently filtered.
//! All functions are pure - no side effects, testable without TUI.

/// State of the "select N" popover.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectInput {
    /// Popover hidden.
    #[default]
    Closed,
    /// Popover shown with the text typed so far.
    Open {
        /// Raw input text.
        text: String,
        /// Cursor position in characters.
        cursor: usize,
    },
}

impl SelectInput {
    /// Whether the popover is shown.
    pub fn is_open(&self) -> bool {
        matches!(self, SelectInput::Open { .. })
    }

    /// Current input text (empty when closed).
    pub fn text(&self) -> &str {
        match self {
            SelectInput::Open { text, .. } => text,
            SelectInput::Closed => "",
        }
    }
}

fn byte_offset(text: &str, cursor: usize) -> usize {
    text.char_indices()
        .nth(cursor)
        .map_or(text.len(), |(offset, _)| offset)
}

/// Show the popover with an empty input.
///
/// No-op if already open.
pub fn open(state: SelectInput) -> SelectInput {
    match state {
        SelectInput::Closed => SelectInput::Open {
            text: String::new(),
            cursor: 0,
        },
        other => other,
    }
}

/// Hide the popover and discard its text.
pub fn close(_state: SelectInput) -> SelectInput {
    SelectInput::Closed
}

/// Insert a character at the cursor and advance it.
///
/// No-op when closed.
pub fn handle_char_input(state: SelectInput, ch: char) -> SelectInput {
    match state {
        SelectInput::Open { mut text, cursor } => {
            text.insert(byte_offset(&text, cursor), ch);
            SelectInput::Open {
                text,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
///
/// No-op when closed or when the cursor is at the start.
pub fn handle_backspace(state: SelectInput) -> SelectInput {
    match state {
        SelectInput::Open { mut text, cursor } if cursor > 0 => {
            text.remove(byte_offset(&text, cursor - 1));
            SelectInput::Open {
                text,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move the cursor one character left, saturating at 0.
pub fn handle_cursor_left(state: SelectInput) -> SelectInput {
    match state {
        SelectInput::Open { text, cursor } => SelectInput::Open {
            text,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move the cursor one character right, saturating at the end of the text.
pub fn handle_cursor_right(state: SelectInput) -> SelectInput {
    match state {
        SelectInput::Open { text, cursor } => {
            let max_cursor = text.chars().count();
            SelectInput::Open {
                text,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}
