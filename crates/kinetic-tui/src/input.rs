use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use kinetic_core::Point;

/// Wheel delta reported per notch, matching the usual desktop convention
pub const WHEEL_NOTCH: i32 = 120;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    ToggleMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextPage,
        (KeyCode::Right, KeyModifiers::NONE) => Action::NextPage,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevPage,
        (KeyCode::Left, KeyModifiers::NONE) => Action::PrevPage,

        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::FirstPage,
        (KeyCode::Home, KeyModifiers::NONE) => Action::FirstPage,
        // Some terminals report 'G' without the shift modifier
        (KeyCode::Char('G'), _) => Action::LastPage,
        (KeyCode::End, KeyModifiers::NONE) => Action::LastPage,

        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::ToggleMode,

        _ => Action::None,
    }
}

/// Pointer input in engine units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Point),
    Move(Point),
    Up,
    /// The host lost the pointer before it was released
    Cancel,
    Wheel(i32),
}

/// Translate a terminal mouse event, scaling cells by `cell_scale`
///
/// Terminal cells are about twice as tall as they are wide, so rows count
/// double.
pub fn handle_mouse_event(mouse: MouseEvent, cell_scale: f64) -> Option<PointerInput> {
    let point = Point::new(
        f64::from(mouse.column) * cell_scale,
        f64::from(mouse.row) * cell_scale * 2.0,
    );

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerInput::Down(point)),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerInput::Move(point)),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerInput::Up),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            Some(PointerInput::Wheel(WHEEL_NOTCH))
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            Some(PointerInput::Wheel(-WHEEL_NOTCH))
        }
        _ => None,
    }
}
