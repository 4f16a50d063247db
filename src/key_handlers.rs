use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands available while browsing the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextPage,
    PrevPage,
    CursorUp,
    CursorDown,
    ScreenUp,
    ScreenDown,
    Top,
    Bottom,
    StartFilter,
    ClearFilter,
    ToggleHelp,
    ToggleTitleBar,
    ToggleStatusBar,
    Quit,
}

/// Edits applied to the filter text while it is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterInput {
    Push(char),
    Pop,
    Apply,
    Cancel,
    Quit,
}

/// Key, help text pairs shown in the footer.
pub const SHORT_HELP: &[(&str, &str)] = &[
    ("n", "next page"),
    ("p", "previous page"),
    ("/", "filter"),
    ("h", "toggle help"),
    ("q", "quit"),
];

pub const FULL_HELP: &[(&str, &str)] = &[
    ("↑/k", "up"),
    ("↓/j", "down"),
    ("pgup/pgdn", "scroll a screen"),
    ("home/end", "first/last row"),
    ("n", "next page"),
    ("p", "previous page"),
    ("/", "filter"),
    ("esc", "clear filter"),
    ("t", "toggle title bar"),
    ("b", "toggle status bar"),
    ("h", "toggle help"),
    ("q", "quit"),
];

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub fn browse_action(key: KeyEvent) -> Option<Action> {
    if is_ctrl_c(&key) {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::NextPage),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::PrevPage),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
        KeyCode::PageUp => Some(Action::ScreenUp),
        KeyCode::PageDown => Some(Action::ScreenDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
        KeyCode::Char('/') => Some(Action::StartFilter),
        KeyCode::Esc => Some(Action::ClearFilter),
        KeyCode::Char('h') | KeyCode::Char('H') => Some(Action::ToggleHelp),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(Action::ToggleTitleBar),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Action::ToggleStatusBar),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

pub fn filter_input(key: KeyEvent) -> Option<FilterInput> {
    if is_ctrl_c(&key) {
        return Some(FilterInput::Quit);
    }
    match key.code {
        KeyCode::Enter => Some(FilterInput::Apply),
        KeyCode::Esc => Some(FilterInput::Cancel),
        KeyCode::Backspace => Some(FilterInput::Pop),
        KeyCode::Char(c) => Some(FilterInput::Push(c)),
        _ => None,
    }
}
