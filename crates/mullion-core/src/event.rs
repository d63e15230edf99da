#![forbid(unsafe_code)]

//! Terminal event vocabulary.
//!
//! Events use 0-indexed cell coordinates matching [`crate::geometry::Rect`].
//! The native mapping layer converts crossterm events into this vocabulary;
//! embedders with a different input source construct the types directly.
//!
//! Terminals report raw button transitions but never clicks, so the
//! [`ClickRecognizer`] synthesizes [`MouseEventKind::Click`] from a press and
//! release observed on the same cell. Feed it every mouse event and deliver
//! whatever it returns after the event itself.

use bitflags::bitflags;

/// A terminal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard key press.
    Key(KeyEvent),
    /// Mouse activity.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal gained focus.
    FocusGained,
    /// Terminal lost focus.
    FocusLost,
}

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

bitflags! {
    /// Keyboard modifier state attached to key and mouse events.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
    }
}

/// A mouse event at an absolute cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Column (0-indexed).
    pub x: u16,
    /// Row (0-indexed).
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::empty(),
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The event position as `(x, y)`.
    #[inline]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

/// Kinds of mouse activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Button pressed.
    Down(MouseButton),
    /// Button released.
    Up(MouseButton),
    /// Pointer moved with a button held.
    Drag(MouseButton),
    /// Pointer moved with no button held.
    Moved,
    /// Press and release observed on the same cell.
    ///
    /// Never produced by the native mapping; see [`ClickRecognizer`].
    Click(MouseButton),
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

// --- Click synthesis -------------------------------------------------------

/// Synthesizes [`MouseEventKind::Click`] events from press/release pairs.
///
/// A click fires when a button is released on the same cell it was pressed
/// on; the pointer may wander in between. A release elsewhere, or a second
/// press before release, discards the pending press.
#[derive(Debug, Default)]
pub struct ClickRecognizer {
    pressed: Option<(MouseButton, u16, u16)>,
}

impl ClickRecognizer {
    pub const fn new() -> Self {
        Self { pressed: None }
    }

    /// Observe a mouse event, returning a synthesized click if one completed.
    pub fn observe(&mut self, event: &MouseEvent) -> Option<MouseEvent> {
        match event.kind {
            MouseEventKind::Down(button) => {
                self.pressed = Some((button, event.x, event.y));
                None
            }
            MouseEventKind::Up(button) => match self.pressed.take() {
                Some((pressed, x, y)) if pressed == button && (x, y) == (event.x, event.y) => {
                    Some(
                        MouseEvent::new(MouseEventKind::Click(button), x, y)
                            .with_modifiers(event.modifiers),
                    )
                }
                _ => None,
            },
            _ => None,
        }
    }
}

// --- Native mapping --------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::{Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};
    use crossterm::event as cte;

    /// Map a crossterm event into the mullion vocabulary.
    ///
    /// Returns `None` for events with no counterpart (key releases, paste,
    /// unmapped keys).
    pub fn map_crossterm_event(event: cte::Event) -> Option<Event> {
        match event {
            cte::Event::Key(key) if key.kind != cte::KeyEventKind::Release => {
                Some(Event::Key(map_key_event(key)?))
            }
            cte::Event::Mouse(mouse) => Some(Event::Mouse(map_mouse_event(mouse))),
            cte::Event::Resize(cols, rows) => Some(Event::Resize(cols, rows)),
            cte::Event::FocusGained => Some(Event::FocusGained),
            cte::Event::FocusLost => Some(Event::FocusLost),
            _ => None,
        }
    }

    fn map_key_event(event: cte::KeyEvent) -> Option<KeyEvent> {
        let code = match event.code {
            cte::KeyCode::Char(c) => KeyCode::Char(c),
            cte::KeyCode::Enter => KeyCode::Enter,
            cte::KeyCode::Esc => KeyCode::Esc,
            cte::KeyCode::Backspace => KeyCode::Backspace,
            cte::KeyCode::Delete => KeyCode::Delete,
            cte::KeyCode::Tab => KeyCode::Tab,
            cte::KeyCode::Left => KeyCode::Left,
            cte::KeyCode::Right => KeyCode::Right,
            cte::KeyCode::Up => KeyCode::Up,
            cte::KeyCode::Down => KeyCode::Down,
            cte::KeyCode::Home => KeyCode::Home,
            cte::KeyCode::End => KeyCode::End,
            cte::KeyCode::PageUp => KeyCode::PageUp,
            cte::KeyCode::PageDown => KeyCode::PageDown,
            cte::KeyCode::F(n) => KeyCode::F(n),
            _ => return None,
        };
        Some(KeyEvent::new(code).with_modifiers(map_modifiers(event.modifiers)))
    }

    fn map_mouse_event(event: cte::MouseEvent) -> MouseEvent {
        let kind = match event.kind {
            cte::MouseEventKind::Down(button) => MouseEventKind::Down(map_button(button)),
            cte::MouseEventKind::Up(button) => MouseEventKind::Up(map_button(button)),
            cte::MouseEventKind::Drag(button) => MouseEventKind::Drag(map_button(button)),
            cte::MouseEventKind::Moved => MouseEventKind::Moved,
            cte::MouseEventKind::ScrollUp => MouseEventKind::ScrollUp,
            cte::MouseEventKind::ScrollDown => MouseEventKind::ScrollDown,
            cte::MouseEventKind::ScrollLeft => MouseEventKind::ScrollLeft,
            cte::MouseEventKind::ScrollRight => MouseEventKind::ScrollRight,
        };
        MouseEvent::new(kind, event.column, event.row)
            .with_modifiers(map_modifiers(event.modifiers))
    }

    fn map_button(button: cte::MouseButton) -> MouseButton {
        match button {
            cte::MouseButton::Left => MouseButton::Left,
            cte::MouseButton::Right => MouseButton::Right,
            cte::MouseButton::Middle => MouseButton::Middle,
        }
    }

    fn map_modifiers(modifiers: cte::KeyModifiers) -> Modifiers {
        let mut out = Modifiers::empty();
        if modifiers.contains(cte::KeyModifiers::SHIFT) {
            out |= Modifiers::SHIFT;
        }
        if modifiers.contains(cte::KeyModifiers::CONTROL) {
            out |= Modifiers::CTRL;
        }
        if modifiers.contains(cte::KeyModifiers::ALT) {
            out |= Modifiers::ALT;
        }
        out
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::map_crossterm_event;

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, x: u16, y: u16) -> MouseEvent {
        MouseEvent::new(kind, x, y)
    }

    #[test]
    fn click_fires_on_press_release_same_cell() {
        let mut rec = ClickRecognizer::new();
        assert!(
            rec.observe(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 7))
                .is_none()
        );
        let click = rec
            .observe(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 7))
            .unwrap();
        assert_eq!(click.kind, MouseEventKind::Click(MouseButton::Left));
        assert_eq!(click.position(), (4, 7));
    }

    #[test]
    fn click_survives_intermediate_motion() {
        let mut rec = ClickRecognizer::new();
        rec.observe(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 7));
        rec.observe(&mouse(MouseEventKind::Drag(MouseButton::Left), 9, 9));
        assert!(
            rec.observe(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 7))
                .is_some()
        );
    }

    #[test]
    fn release_elsewhere_is_not_a_click() {
        let mut rec = ClickRecognizer::new();
        rec.observe(&mouse(MouseEventKind::Down(MouseButton::Left), 4, 7));
        assert!(
            rec.observe(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 7))
                .is_none()
        );
        // The pending press is gone; a later release alone does nothing.
        assert!(
            rec.observe(&mouse(MouseEventKind::Up(MouseButton::Left), 4, 7))
                .is_none()
        );
    }

    #[test]
    fn release_of_other_button_is_not_a_click() {
        let mut rec = ClickRecognizer::new();
        rec.observe(&mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        assert!(
            rec.observe(&mouse(MouseEventKind::Up(MouseButton::Right), 1, 1))
                .is_none()
        );
    }

    #[test]
    fn click_carries_release_modifiers() {
        let mut rec = ClickRecognizer::new();
        rec.observe(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
        let up = mouse(MouseEventKind::Up(MouseButton::Left), 2, 2)
            .with_modifiers(Modifiers::CTRL);
        let click = rec.observe(&up).unwrap();
        assert_eq!(click.modifiers, Modifiers::CTRL);
    }
}
