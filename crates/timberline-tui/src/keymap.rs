//! Static keybindings shared by the input dispatcher and the help line
//!
//! One table maps logical actions to their key triggers and help labels;
//! the short and full legends are both derived from it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Logical user actions the viewer understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Up,
    Down,
    Left,
    Right,
    ToggleFocus,
    ToggleHelp,
    Select,
    Quit,
}

/// One keybinding: triggers plus its help legend entry
pub struct Binding {
    pub action: UserAction,
    keys: &'static [(KeyModifiers, KeyCode)],
    pub label: &'static str,
    pub help: &'static str,
}

impl Binding {
    fn matches(&self, key: &KeyEvent) -> bool {
        self.keys
            .iter()
            .any(|(modifiers, code)| key.code == *code && key.modifiers == *modifiers)
    }
}

const BINDINGS: &[Binding] = &[
    Binding {
        action: UserAction::Up,
        keys: &[
            (KeyModifiers::NONE, KeyCode::Up),
            (KeyModifiers::NONE, KeyCode::Char('k')),
        ],
        label: "↑/k",
        help: "move up",
    },
    Binding {
        action: UserAction::Down,
        keys: &[
            (KeyModifiers::NONE, KeyCode::Down),
            (KeyModifiers::NONE, KeyCode::Char('j')),
        ],
        label: "↓/j",
        help: "move down",
    },
    Binding {
        action: UserAction::Left,
        keys: &[
            (KeyModifiers::NONE, KeyCode::Left),
            (KeyModifiers::NONE, KeyCode::Char('h')),
        ],
        label: "←/h",
        help: "move left",
    },
    Binding {
        action: UserAction::Right,
        keys: &[
            (KeyModifiers::NONE, KeyCode::Right),
            (KeyModifiers::NONE, KeyCode::Char('l')),
        ],
        label: "→/l",
        help: "move right",
    },
    Binding {
        action: UserAction::ToggleFocus,
        keys: &[(KeyModifiers::NONE, KeyCode::Esc)],
        label: "esc",
        help: "toggle focus",
    },
    Binding {
        action: UserAction::Select,
        keys: &[(KeyModifiers::NONE, KeyCode::Enter)],
        label: "enter",
        help: "select row",
    },
    Binding {
        action: UserAction::ToggleHelp,
        keys: &[(KeyModifiers::NONE, KeyCode::Char('?'))],
        label: "?",
        help: "toggle help",
    },
    Binding {
        action: UserAction::Quit,
        keys: &[
            (KeyModifiers::NONE, KeyCode::Char('q')),
            (KeyModifiers::CONTROL, KeyCode::Char('c')),
        ],
        label: "q",
        help: "quit",
    },
];

/// Resolve a raw key event against the binding table.
///
/// Unbound keys resolve to None and produce no transition.
pub fn action_for(key: &KeyEvent) -> Option<UserAction> {
    BINDINGS.iter().find(|b| b.matches(key)).map(|b| b.action)
}

/// Bindings shown in the collapsed help line
pub fn short_help() -> impl Iterator<Item = &'static Binding> {
    BINDINGS
        .iter()
        .filter(|b| matches!(b.action, UserAction::ToggleHelp | UserAction::Quit))
}

/// All bindings, for the expanded help line
pub fn full_help() -> impl Iterator<Item = &'static Binding> {
    BINDINGS.iter()
}
