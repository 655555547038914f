//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Row cursor
    /// Move the row cursor up. Default: k/↑
    CursorUp,
    /// Move the row cursor down. Default: j/↓
    CursorDown,

    // Checkboxes
    /// Toggle the checkbox of the row under the cursor. Default: Space
    ToggleRow,
    /// Header checkbox: check every row on the page, or clear the page if all
    /// rows are already checked. Default: a
    TogglePage,
    /// Open the "select first N rows" input. Default: s
    OpenSelectCount,

    // Paginator
    /// Go to the next page. Default: l/→/n
    NextPage,
    /// Go to the previous page. Default: h/←/p
    PrevPage,
    /// Go to the first page. Default: g/Home
    FirstPage,
    /// Go to the last page. Default: G/End
    LastPage,
    /// Fetch the current page again. Default: r
    Reload,

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}
