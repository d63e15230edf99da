#![forbid(unsafe_code)]

//! A bordered, movable panel hosting one content pane.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use mullion_core::event::{MouseButton, MouseEvent, MouseEventKind};
use mullion_core::geometry::{Rect, Sides};
use mullion_render::buffer::Buffer;
use mullion_render::cell::{Cell, PackedRgba};

use crate::borders::{BorderType, draw_border};
use crate::button::{WindowButton, layout_buttons};
use crate::manager::{ManagerInner, WindowManager};
use crate::{Alignment, Pane, SharedPane, Style, apply_style, draw_text_span, lock, share};

/// A window: border chrome, title bar with buttons, and one hosted pane.
///
/// `Window` is a cheaply cloneable handle; clones refer to the same window
/// ([`Window::ptr_eq`]). A window is constructed detached and becomes
/// attached when a [`WindowManager`] creates or shows it. The
/// manager-dependent operations ([`show`](Self::show), [`hide`](Self::hide),
/// [`show_modal`](Self::show_modal), [`maximize`](Self::maximize),
/// [`center`](Self::center)) panic on a detached window.
#[derive(Clone)]
pub struct Window {
    inner: Arc<Mutex<WindowState>>,
}

struct WindowState {
    rect: Rect,
    restore: Rect,
    maximized: bool,
    draggable: bool,
    resizable: bool,
    border: bool,
    border_type: BorderType,
    title: String,
    title_alignment: Alignment,
    chrome_focused: bool,
    style: Style,
    border_style: Style,
    title_style: Style,
    button_style: Style,
    buttons: Vec<WindowButton>,
    content: Option<SharedPane>,
    manager: Weak<ManagerInner>,
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    /// Create a detached window with default geometry and a border.
    pub fn new() -> Self {
        let rect = Rect::new(0, 0, 20, 10);
        Self {
            inner: Arc::new(Mutex::new(WindowState {
                rect,
                restore: rect,
                maximized: false,
                draggable: false,
                resizable: false,
                border: true,
                border_type: BorderType::default(),
                title: String::new(),
                title_alignment: Alignment::default(),
                chrome_focused: false,
                style: Style::new(),
                border_style: Style::new(),
                title_style: Style::new(),
                button_style: Style::new().fg(PackedRgba::rgb(255, 255, 0)),
                buttons: Vec::new(),
                content: None,
                manager: Weak::new(),
            })),
        }
    }

    /// Whether two handles refer to the same window.
    pub fn ptr_eq(&self, other: &Window) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // --- Geometry ----------------------------------------------------------

    pub fn rect(&self) -> Rect {
        lock(&self.inner).rect
    }

    pub fn set_rect(&self, rect: Rect) -> &Self {
        lock(&self.inner).rect = rect;
        self
    }

    /// The content area inside the border chrome.
    pub fn inner_rect(&self) -> Rect {
        let state = lock(&self.inner);
        inner_rect(state.rect, state.border)
    }

    pub fn is_maximized(&self) -> bool {
        lock(&self.inner).maximized
    }

    // --- Chrome ------------------------------------------------------------

    pub fn set_title(&self, title: impl Into<String>) -> &Self {
        lock(&self.inner).title = title.into();
        self
    }

    pub fn title(&self) -> String {
        lock(&self.inner).title.clone()
    }

    pub fn set_title_alignment(&self, alignment: Alignment) -> &Self {
        lock(&self.inner).title_alignment = alignment;
        self
    }

    /// Toggle the border chrome. A borderless window has no title bar:
    /// no buttons are drawn and border drags never start on it.
    pub fn set_border(&self, border: bool) -> &Self {
        lock(&self.inner).border = border;
        self
    }

    pub fn has_border(&self) -> bool {
        lock(&self.inner).border
    }

    pub fn set_border_type(&self, border_type: BorderType) -> &Self {
        lock(&self.inner).border_type = border_type;
        self
    }

    pub fn set_draggable(&self, draggable: bool) -> &Self {
        lock(&self.inner).draggable = draggable;
        self
    }

    pub fn is_draggable(&self) -> bool {
        lock(&self.inner).draggable
    }

    pub fn set_resizable(&self, resizable: bool) -> &Self {
        lock(&self.inner).resizable = resizable;
        self
    }

    pub fn is_resizable(&self) -> bool {
        lock(&self.inner).resizable
    }

    pub fn set_style(&self, style: Style) -> &Self {
        lock(&self.inner).style = style;
        self
    }

    pub fn set_border_style(&self, style: Style) -> &Self {
        lock(&self.inner).border_style = style;
        self
    }

    pub fn set_title_style(&self, style: Style) -> &Self {
        lock(&self.inner).title_style = style;
        self
    }

    pub fn set_button_style(&self, style: Style) -> &Self {
        lock(&self.inner).button_style = style;
        self
    }

    // --- Content -----------------------------------------------------------

    /// Replace the hosted content pane.
    pub fn set_content(&self, pane: SharedPane) -> &Self {
        lock(&self.inner).content = Some(pane);
        self
    }

    /// Wrap `pane` for sharing, host it, and return the shared handle.
    pub fn host<P: Pane + Send + 'static>(&self, pane: P) -> SharedPane {
        let pane = share(pane);
        self.set_content(pane.clone());
        pane
    }

    /// The hosted content pane, if any.
    pub fn content(&self) -> Option<SharedPane> {
        lock(&self.inner).content.clone()
    }

    // --- Title-bar buttons --------------------------------------------------

    /// Append a title-bar button and recompute every button's offset.
    pub fn add_button(&self, button: WindowButton) -> &Self {
        let mut state = lock(&self.inner);
        state.buttons.push(button);
        layout_buttons(&mut state.buttons);
        self
    }

    pub fn button_count(&self) -> usize {
        lock(&self.inner).buttons.len()
    }

    /// A copy of the button at `i`, offset included.
    pub fn button(&self, i: usize) -> Option<WindowButton> {
        lock(&self.inner).buttons.get(i).cloned()
    }

    // --- Manager-dependent operations ---------------------------------------

    /// The owning manager.
    ///
    /// # Panics
    ///
    /// Panics if the window has not been attached to a manager.
    pub fn manager(&self) -> WindowManager {
        self.try_manager()
            .expect("window must be attached to a window manager to call this method")
    }

    /// The owning manager, or `None` while detached.
    pub fn try_manager(&self) -> Option<WindowManager> {
        lock(&self.inner).manager.upgrade().map(WindowManager::from_inner)
    }

    pub(crate) fn attach(&self, manager: &WindowManager) {
        lock(&self.inner).manager = manager.downgrade();
    }

    /// Add this window to the top of its manager's stack.
    ///
    /// # Panics
    ///
    /// Panics if the window is detached.
    pub fn show(&self) -> &Self {
        self.manager().show(self);
        self
    }

    /// Remove this window from its manager's stack.
    ///
    /// # Panics
    ///
    /// Panics if the window is detached.
    pub fn hide(&self) -> &Self {
        self.manager().hide(self);
        self
    }

    /// Show this window and give it exclusive pointer hit-testing.
    ///
    /// # Panics
    ///
    /// Panics if the window is detached.
    pub fn show_modal(&self) -> &Self {
        self.manager().show_modal(self);
        self
    }

    /// Snapshot the current geometry and grow to the manager's viewport.
    ///
    /// The snapshot is restored by [`restore`](Self::restore). While the
    /// maximized flag is set, the manager's layout pass keeps the window at
    /// viewport size even as the viewport changes.
    ///
    /// # Panics
    ///
    /// Panics if the window is detached.
    pub fn maximize(&self) -> &Self {
        let viewport = self.manager().inner_rect();
        let mut state = lock(&self.inner);
        state.restore = state.rect;
        state.rect = viewport;
        state.maximized = true;
        self
    }

    /// Return to the geometry saved by [`maximize`](Self::maximize).
    ///
    /// Safe on a window that was never maximized: the restore slot defaults
    /// to the construction-time geometry.
    pub fn restore(&self) -> &Self {
        let mut state = lock(&self.inner);
        state.rect = state.restore;
        state.maximized = false;
        self
    }

    /// Center this window inside the manager's viewport, keeping its size.
    ///
    /// # Panics
    ///
    /// Panics if the window is detached.
    pub fn center(&self) -> &Self {
        let viewport = self.manager().inner_rect();
        let mut state = lock(&self.inner);
        state.rect = state.rect.centered_in(viewport);
        self
    }

    // --- Focus --------------------------------------------------------------

    /// Give this window focus.
    ///
    /// With content hosted, focus is delegated to the content and the
    /// window's own chrome is marked unfocused; otherwise the chrome itself
    /// becomes the focus target.
    pub fn focus(&self) {
        let content = {
            let mut state = lock(&self.inner);
            if state.content.is_none() {
                state.chrome_focused = true;
                return;
            }
            state.chrome_focused = false;
            state.content.clone()
        };
        if let Some(pane) = content {
            lock(&pane).focus();
        }
    }

    /// Remove focus from the chrome and the hosted content.
    pub fn blur(&self) {
        let content = {
            let mut state = lock(&self.inner);
            state.chrome_focused = false;
            state.content.clone()
        };
        if let Some(pane) = content {
            lock(&pane).blur();
        }
    }

    /// Whether the hosted content reports focus, or with no content, whether
    /// the chrome does.
    pub fn has_focus(&self) -> bool {
        let (content, chrome_focused) = {
            let state = lock(&self.inner);
            (state.content.clone(), state.chrome_focused)
        };
        match content {
            Some(pane) => lock(&pane).has_focus(),
            None => chrome_focused,
        }
    }

    // --- Internals ----------------------------------------------------------

    pub(crate) fn draw(&self, buf: &mut Buffer) {
        let (content, chrome) = {
            let state = lock(&self.inner);
            (state.content.clone(), ChromeSnapshot::of(&state))
        };

        let content_focused = content
            .as_ref()
            .map(|pane| lock(pane).has_focus())
            .unwrap_or(false);
        let mut chrome_focused = chrome.chrome_focused;
        if content_focused && chrome_focused {
            // Focus belongs to the content; the chrome yields.
            lock(&self.inner).chrome_focused = false;
            chrome_focused = false;
        }

        let mut body = Cell::from_char(' ');
        apply_style(&mut body, chrome.style);
        buf.fill(chrome.rect, body);

        if chrome.border {
            let border_type = if chrome_focused || content_focused {
                BorderType::Double
            } else {
                chrome.border_type
            };
            draw_border(buf, chrome.rect, border_type.to_border_set(), chrome.border_style);
            self.draw_title(buf, &chrome);
        }

        if let Some(pane) = content {
            let inner = inner_rect(chrome.rect, chrome.border);
            let mut pane = lock(&pane);
            pane.set_rect(inner);
            buf.push_scissor(inner);
            pane.render(buf);
            buf.pop_scissor();
        }

        if chrome.border {
            buf.push_scissor(chrome.rect);
            for (symbol, offset) in &chrome.buttons {
                let Some(x) = button_column(chrome.rect, *offset) else {
                    continue;
                };
                let bracket = |c: char| {
                    let mut cell = Cell::from_char(c);
                    apply_style(&mut cell, chrome.button_style);
                    cell
                };
                if x > 0 {
                    buf.set(x - 1, chrome.rect.y, bracket('['));
                }
                buf.set(x, chrome.rect.y, bracket(*symbol));
                buf.set(x + 1, chrome.rect.y, bracket(']'));
            }
            buf.pop_scissor();
        }
    }

    fn draw_title(&self, buf: &mut Buffer, chrome: &ChromeSnapshot) {
        if chrome.title.is_empty() || chrome.rect.width <= 2 {
            return;
        }
        let span = chrome.rect.inner(Sides::new(0, 1, 0, 1));
        let title_width = chrome
            .title
            .chars()
            .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0) as u16)
            .sum::<u16>()
            .min(span.width);
        let x = match chrome.title_alignment {
            Alignment::Left => span.x,
            Alignment::Center => span.x + (span.width - title_width) / 2,
            Alignment::Right => span.right() - title_width,
        };
        draw_text_span(buf, x, chrome.rect.y, &chrome.title, chrome.title_style, span.right());
    }

    pub(crate) fn handle_mouse(&self, event: &MouseEvent) -> bool {
        let (content, button_hit) = {
            let state = lock(&self.inner);
            let hit = if event.kind == MouseEventKind::Click(MouseButton::Left)
                && state.border
                && event.y == state.rect.y
            {
                state
                    .buttons
                    .iter()
                    .find(|b| button_column(state.rect, b.offset()) == Some(event.x))
                    .map(|b| b.handler())
            } else {
                None
            };
            (state.content.clone(), hit)
        };

        if let Some(handler) = button_hit {
            if let Some(handler) = handler {
                handler();
            }
            return true;
        }

        match content {
            Some(pane) => lock(&pane).on_mouse(event),
            None => false,
        }
    }
}

impl Pane for Window {
    fn rect(&self) -> Rect {
        Window::rect(self)
    }

    fn set_rect(&mut self, rect: Rect) {
        Window::set_rect(self, rect);
    }

    fn render(&mut self, buf: &mut Buffer) {
        self.draw(buf);
    }

    fn focus(&mut self) {
        Window::focus(self);
    }

    fn blur(&mut self) {
        Window::blur(self);
    }

    fn has_focus(&self) -> bool {
        Window::has_focus(self)
    }

    fn on_mouse(&mut self, event: &MouseEvent) -> bool {
        self.handle_mouse(event)
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.inner);
        f.debug_struct("Window")
            .field("rect", &state.rect)
            .field("title", &state.title)
            .field("maximized", &state.maximized)
            .finish_non_exhaustive()
    }
}

struct ChromeSnapshot {
    rect: Rect,
    border: bool,
    border_type: BorderType,
    chrome_focused: bool,
    style: Style,
    border_style: Style,
    title: String,
    title_alignment: Alignment,
    title_style: Style,
    button_style: Style,
    buttons: Vec<(char, i16)>,
}

impl ChromeSnapshot {
    fn of(state: &WindowState) -> Self {
        Self {
            rect: state.rect,
            border: state.border,
            border_type: state.border_type,
            chrome_focused: state.chrome_focused,
            style: state.style,
            border_style: state.border_style,
            title: state.title.clone(),
            title_alignment: state.title_alignment,
            title_style: state.title_style,
            button_style: state.button_style,
            buttons: state
                .buttons
                .iter()
                .map(|b| (b.symbol(), b.offset()))
                .collect(),
        }
    }
}

/// The column a button's symbol occupies, or `None` if the offset points
/// outside the window.
fn button_column(rect: Rect, offset: i16) -> Option<u16> {
    let x = if offset >= 0 {
        rect.x as i32 + offset as i32
    } else {
        rect.x as i32 + rect.width as i32 + offset as i32
    };
    (x >= 0 && x <= u16::MAX as i32).then_some(x as u16)
}

fn inner_rect(rect: Rect, border: bool) -> Rect {
    if border {
        rect.inner(Sides::all(1))
    } else {
        rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::ButtonSide;

    #[test]
    fn new_window_is_detached_and_bordered() {
        let window = Window::new();
        assert!(window.try_manager().is_none());
        assert!(window.has_border());
        assert!(!window.is_maximized());
    }

    #[test]
    #[should_panic(expected = "attached to a window manager")]
    fn show_on_detached_window_panics() {
        Window::new().show();
    }

    #[test]
    #[should_panic(expected = "attached to a window manager")]
    fn maximize_on_detached_window_panics() {
        Window::new().maximize();
    }

    #[test]
    fn restore_without_maximize_returns_construction_geometry() {
        let window = Window::new();
        let initial = window.rect();
        window.set_rect(Rect::new(5, 5, 30, 12));
        window.restore();
        assert_eq!(window.rect(), initial);
    }

    #[test]
    fn inner_rect_excludes_border() {
        let window = Window::new();
        window.set_rect(Rect::new(2, 2, 10, 6));
        assert_eq!(window.inner_rect(), Rect::new(3, 3, 8, 4));
        window.set_border(false);
        assert_eq!(window.inner_rect(), Rect::new(2, 2, 10, 6));
    }

    #[test]
    fn button_offsets_follow_insertion_order() {
        let window = Window::new();
        window
            .add_button(WindowButton::new('x', ButtonSide::Left))
            .add_button(WindowButton::new('□', ButtonSide::Right))
            .add_button(WindowButton::new('_', ButtonSide::Left));
        let offsets: Vec<i16> = (0..window.button_count())
            .map(|i| window.button(i).unwrap().offset())
            .collect();
        assert_eq!(offsets, vec![2, -3, 5]);
    }

    #[test]
    fn button_column_resolves_negative_offsets_from_right_edge() {
        let rect = Rect::new(10, 0, 20, 5);
        assert_eq!(button_column(rect, 2), Some(12));
        assert_eq!(button_column(rect, -3), Some(27));
    }

    #[test]
    fn focus_without_content_lands_on_chrome() {
        let window = Window::new();
        assert!(!window.has_focus());
        window.focus();
        assert!(window.has_focus());
        window.blur();
        assert!(!window.has_focus());
    }

    #[test]
    fn click_on_title_row_button_fires_callback() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let clicks = Arc::new(AtomicUsize::new(0));
        let counted = clicks.clone();
        let mut window = Window::new();
        window.set_rect(Rect::new(0, 0, 20, 10)).add_button(
            WindowButton::new('x', ButtonSide::Right)
                .on_click(move || {
                    counted.fetch_add(1, Ordering::SeqCst);
                }),
        );

        // Offset −3 from the right edge of a 20-wide window at x=0 → column 17.
        let click = MouseEvent::new(MouseEventKind::Click(MouseButton::Left), 17, 0);
        assert!(window.on_mouse(&click));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        // Title row but no button there: not consumed (no content either).
        let miss = MouseEvent::new(MouseEventKind::Click(MouseButton::Left), 5, 0);
        assert!(!window.on_mouse(&miss));
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn draw_renders_border_title_and_buttons() {
        let mut buf = Buffer::new(30, 10);
        let mut window = Window::new();
        window
            .set_rect(Rect::new(0, 0, 20, 6))
            .set_title("log")
            .add_button(WindowButton::new('x', ButtonSide::Right));
        window.render(&mut buf);

        assert_eq!(buf.char_at(0, 0), '┌');
        assert_eq!(buf.char_at(19, 0), '┐');
        // Title starts inside the top border.
        assert_eq!(buf.char_at(1, 0), 'l');
        assert_eq!(buf.char_at(3, 0), 'g');
        // Button [x] at offset −3: symbol at column 17.
        assert_eq!(buf.char_at(16, 0), '[');
        assert_eq!(buf.char_at(17, 0), 'x');
        assert_eq!(buf.char_at(18, 0), ']');
    }

    #[test]
    fn focused_window_draws_double_border() {
        let mut buf = Buffer::new(30, 10);
        let mut window = Window::new();
        window.set_rect(Rect::new(0, 0, 10, 5));
        window.focus();
        window.render(&mut buf);
        assert_eq!(buf.char_at(0, 0), '╔');
    }
}
