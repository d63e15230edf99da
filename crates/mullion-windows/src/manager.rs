#![forbid(unsafe_code)]

//! The window manager: z-stack, modal exclusivity, per-draw layout clamp,
//! and the pointer drag/resize state machine.
//!
//! # Locking
//!
//! One mutex guards the window sequence, the modal reference, and the drag
//! session. It is held only around reads and writes of that state — never
//! across a window's own draw or mouse dispatch — so content that mutates
//! the stack from inside its handlers (closing its own window, opening a
//! dialog) does not deadlock. Lock order is always manager state, then a
//! window, then its content.

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use mullion_core::event::{MouseButton, MouseEvent, MouseEventKind};
use mullion_core::geometry::Rect;
use mullion_render::buffer::Buffer;
use mullion_render::cell::Cell;

use crate::window::Window;
use crate::{Pane, SharedPane, Style, apply_style, lock};

/// Smallest width a managed window is ever laid out at.
pub const MIN_WINDOW_WIDTH: u16 = 3;
/// Smallest height a managed window is ever laid out at.
pub const MIN_WINDOW_HEIGHT: u16 = 3;

/// Classification of a border pointer-down.
///
/// A `Top` hit moves the window; every other edge resizes it, keeping the
/// opposite edge or corner anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEdge {
    Top,
    Right,
    Bottom,
    Left,
    BottomRight,
    BottomLeft,
}

/// An in-progress drag or resize.
struct DragSession {
    window: Window,
    edge: WindowEdge,
    /// Pointer offset from the window origin, captured at the down event.
    offset_x: u16,
    offset_y: u16,
}

impl DragSession {
    /// Recompute the target window's rectangle for a pointer position.
    ///
    /// Move drags keep the size and reposition the origin; resize drags let
    /// the grabbed edge follow the pointer while the opposite edge stays
    /// anchored. The result may momentarily dip below the minimum floor or
    /// leave the viewport; the next layout pass repairs it.
    fn apply(&self, event: &MouseEvent) {
        let r = self.window.rect();
        let (x, y) = event.position();
        let next = match self.edge {
            WindowEdge::Top => Rect::new(
                x.saturating_sub(self.offset_x),
                y.saturating_sub(self.offset_y),
                r.width,
                r.height,
            ),
            WindowEdge::Right => Rect::new(
                r.x,
                r.y,
                x.saturating_sub(r.x).saturating_add(1),
                r.height,
            ),
            WindowEdge::Bottom => Rect::new(
                r.x,
                r.y,
                r.width,
                y.saturating_sub(r.y).saturating_add(1),
            ),
            WindowEdge::Left => Rect::new(x, r.y, r.right().saturating_sub(x), r.height),
            WindowEdge::BottomRight => Rect::new(
                r.x,
                r.y,
                x.saturating_sub(r.x).saturating_add(1),
                y.saturating_sub(r.y).saturating_add(1),
            ),
            WindowEdge::BottomLeft => Rect::new(
                x,
                r.y,
                r.right().saturating_sub(x),
                y.saturating_sub(r.y).saturating_add(1),
            ),
        };
        self.window.set_rect(next);
    }
}

struct ManagerChrome {
    rect: Rect,
    style: Style,
    focused: bool,
}

struct ManagerState {
    /// The z-stack: index 0 is the bottom, the last index the top.
    windows: Vec<Window>,
    modal: Option<Window>,
    drag: Option<DragSession>,
}

pub(crate) struct ManagerInner {
    chrome: Mutex<ManagerChrome>,
    state: Mutex<ManagerState>,
}

/// Manages a z-ordered stack of [`Window`]s inside a fixed viewport.
///
/// The manager is itself a [`Pane`]: it can be positioned, drawn, focused,
/// and fed pointer events like any content node, so managers nest. Handles
/// are cheap clones of the same manager.
#[derive(Clone)]
pub struct WindowManager {
    inner: Arc<ManagerInner>,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                chrome: Mutex::new(ManagerChrome {
                    rect: Rect::default(),
                    style: Style::new(),
                    focused: false,
                }),
                state: Mutex::new(ManagerState {
                    windows: Vec::new(),
                    modal: None,
                    drag: None,
                }),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Arc<ManagerInner>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> Weak<ManagerInner> {
        Arc::downgrade(&self.inner)
    }

    /// Create a window attached to this manager (not yet shown).
    pub fn new_window(&self) -> Window {
        let window = Window::new();
        window.attach(self);
        window
    }

    pub fn rect(&self) -> Rect {
        lock(&self.inner.chrome).rect
    }

    pub fn set_rect(&self, rect: Rect) -> &Self {
        lock(&self.inner.chrome).rect = rect;
        self
    }

    /// The viewport rectangle windows are laid out in.
    ///
    /// The manager draws no border chrome of its own, so this equals its
    /// outer rectangle.
    pub fn inner_rect(&self) -> Rect {
        lock(&self.inner.chrome).rect
    }

    pub fn set_style(&self, style: Style) -> &Self {
        lock(&self.inner.chrome).style = style;
        self
    }

    // --- Stack management ---------------------------------------------------

    /// Insert a window at the top of the stack and attach it.
    ///
    /// Idempotent: showing an already-shown window changes nothing.
    pub fn show(&self, window: &Window) -> &Self {
        let mut state = lock(&self.inner.state);
        if position_of(&state.windows, window).is_some() {
            return self;
        }
        window.attach(self);
        state.windows.push(window.clone());
        #[cfg(feature = "tracing")]
        tracing::trace!(window = ?window, z = state.windows.len() - 1, "window shown");
        self
    }

    /// Show a window and give it exclusive pointer hit-testing.
    pub fn show_modal(&self, window: &Window) -> &Self {
        self.show(window);
        let mut state = lock(&self.inner.state);
        state.modal = Some(window.clone());
        #[cfg(feature = "tracing")]
        tracing::trace!(window = ?window, "window made modal");
        self
    }

    /// Remove a window from the stack.
    ///
    /// Clears modal exclusivity if it was the modal window and discards any
    /// drag session targeting it.
    pub fn hide(&self, window: &Window) -> &Self {
        let mut state = lock(&self.inner.state);
        if state.modal.as_ref().is_some_and(|m| m.ptr_eq(window)) {
            state.modal = None;
        }
        if state
            .drag
            .as_ref()
            .is_some_and(|session| session.window.ptr_eq(window))
        {
            state.drag = None;
        }
        state.windows.retain(|w| !w.ptr_eq(window));
        #[cfg(feature = "tracing")]
        tracing::trace!(window = ?window, "window hidden");
        self
    }

    /// The window currently holding modal exclusivity, if any.
    pub fn modal_window(&self) -> Option<Window> {
        lock(&self.inner.state).modal.clone()
    }

    /// The window hosting exactly this content pane, if any.
    pub fn find_pane(&self, pane: &SharedPane) -> Option<Window> {
        let state = lock(&self.inner.state);
        state
            .windows
            .iter()
            .find(|w| w.content().is_some_and(|c| Arc::ptr_eq(&c, pane)))
            .cloned()
    }

    /// Number of windows currently shown.
    pub fn window_count(&self) -> usize {
        lock(&self.inner.state).windows.len()
    }

    /// The window at stack index `i` (0 = bottom), or `None` out of range.
    pub fn window_at(&self, i: usize) -> Option<Window> {
        lock(&self.inner.state).windows.get(i).cloned()
    }

    /// The stack index of a window, or `None` if it is not shown.
    pub fn get_z(&self, window: &Window) -> Option<usize> {
        position_of(&lock(&self.inner.state).windows, window)
    }

    /// Move a window to stack index `z`, preserving the relative order of
    /// every other window. An out-of-range index clamps to the top slot.
    /// No-op for a window that is not shown.
    pub fn set_z(&self, window: &Window, z: usize) -> &Self {
        set_z_locked(&mut lock(&self.inner.state), window, z);
        self
    }

    /// Move a window to the top of the stack.
    pub fn raise(&self, window: &Window) -> &Self {
        self.set_z(window, usize::MAX)
    }

    /// Focus `target`, blurring every other window and the manager chrome.
    pub fn focus_window(&self, target: &Window) {
        let windows = lock(&self.inner.state).windows.clone();
        for window in &windows {
            if !window.ptr_eq(target) {
                window.blur();
            }
        }
        target.focus();
        lock(&self.inner.chrome).focused = false;
    }

    // --- Draw ---------------------------------------------------------------

    /// Run one render pass: raise the focused window, clamp every window to
    /// the viewport bottom-to-top, and draw the stack in z order.
    pub fn draw(&self, buf: &mut Buffer) {
        let (viewport, style) = {
            let chrome = lock(&self.inner.chrome);
            (chrome.rect, chrome.style)
        };
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "wm_draw",
            x = viewport.x,
            y = viewport.y,
            width = viewport.width,
            height = viewport.height
        )
        .entered();

        let mut backdrop = Cell::from_char(' ');
        apply_style(&mut backdrop, style);
        buf.fill(viewport, backdrop);

        // Focus follows raise: a focused window that is not on top moves
        // there before layout, once per draw, first match from the bottom.
        let windows = {
            let mut state = lock(&self.inner.state);
            let len = state.windows.len();
            if len > 1 {
                let focused = state
                    .windows
                    .iter()
                    .enumerate()
                    .find(|(i, w)| w.has_focus() && *i != len - 1)
                    .map(|(_, w)| w.clone());
                if let Some(window) = focused {
                    set_z_locked(&mut state, &window, usize::MAX);
                }
            }
            state.windows.clone()
        };

        for window in windows {
            window.set_rect(clamp_to_viewport(
                window.rect(),
                window.is_maximized(),
                viewport,
            ));
            window.draw(buf);
        }
    }

    // --- Pointer dispatch ---------------------------------------------------

    /// Resolve a pointer event against the drag session or the z-stack.
    ///
    /// Returns `true` when the event was consumed.
    pub fn handle_mouse(&self, event: &MouseEvent) -> bool {
        if !lock(&self.inner.chrome).rect.contains(event.x, event.y) {
            return false;
        }

        // An open drag session swallows motion and ends on primary-up; the
        // up event itself still goes through ordinary hit-testing below.
        {
            let mut state = lock(&self.inner.state);
            if state.drag.is_some() {
                match event.kind {
                    MouseEventKind::Up(MouseButton::Left) => {
                        state.drag = None;
                        #[cfg(feature = "tracing")]
                        tracing::trace!("drag session ended");
                    }
                    MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                        if let Some(session) = &state.drag {
                            session.apply(event);
                        }
                        return true;
                    }
                    _ => {}
                }
            }
        }

        // Modal exclusivity: while a modal window is set, it is the only
        // hit-test candidate regardless of stacking.
        let candidates: Vec<Window> = {
            let state = lock(&self.inner.state);
            match &state.modal {
                Some(modal) => vec![modal.clone()],
                None => state.windows.clone(),
            }
        };

        // Strict topmost-wins occlusion: the first window under the pointer
        // takes the event; nothing below it is consulted.
        for window in candidates.iter().rev() {
            let rect = window.rect();
            if !rect.contains(event.x, event.y) {
                continue;
            }

            if event.kind == MouseEventKind::Down(MouseButton::Left) && window.has_border() {
                if !window.has_focus() {
                    self.focus_window(window);
                }
                if let Some(edge) = classify_edge(rect, event.x, event.y) {
                    let permitted = match edge {
                        WindowEdge::Top => window.is_draggable(),
                        _ => window.is_resizable(),
                    };
                    if permitted {
                        let mut state = lock(&self.inner.state);
                        state.drag = Some(DragSession {
                            window: window.clone(),
                            edge,
                            offset_x: event.x - rect.x,
                            offset_y: event.y - rect.y,
                        });
                        #[cfg(feature = "tracing")]
                        tracing::trace!(window = ?window, ?edge, "drag session started");
                        return true;
                    }
                }
            }

            return window.handle_mouse(event);
        }

        false
    }
}

impl Pane for WindowManager {
    fn rect(&self) -> Rect {
        WindowManager::rect(self)
    }

    fn set_rect(&mut self, rect: Rect) {
        WindowManager::set_rect(self, rect);
    }

    fn render(&mut self, buf: &mut Buffer) {
        self.draw(buf);
    }

    fn focus(&mut self) {
        let top = lock(&self.inner.state).windows.last().cloned();
        match top {
            Some(window) => self.focus_window(&window),
            None => lock(&self.inner.chrome).focused = true,
        }
    }

    fn blur(&mut self) {
        lock(&self.inner.chrome).focused = false;
    }

    fn has_focus(&self) -> bool {
        let windows = lock(&self.inner.state).windows.clone();
        if windows.iter().rev().any(|w| w.has_focus()) {
            return true;
        }
        lock(&self.inner.chrome).focused
    }

    fn on_mouse(&mut self, event: &MouseEvent) -> bool {
        self.handle_mouse(event)
    }
}

impl fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("rect", &lock(&self.inner.chrome).rect)
            .field("windows", &lock(&self.inner.state).windows.len())
            .finish_non_exhaustive()
    }
}

fn position_of(windows: &[Window], window: &Window) -> Option<usize> {
    windows.iter().position(|w| w.ptr_eq(window))
}

/// Move `window` to index `z` (clamped to the top slot), shifting the
/// windows in between by one.
fn set_z_locked(state: &mut ManagerState, window: &Window, z: usize) {
    let Some(old) = position_of(&state.windows, window) else {
        return;
    };
    let moved = state.windows.remove(old);
    let target = z.min(state.windows.len());
    state.windows.insert(target, moved);
}

/// Classify a border pointer-down against a window rectangle.
///
/// The caller guarantees `(x, y)` lies inside `rect`. The bottom row wins
/// over the side columns so its corners resolve to corner edges; the top
/// row is checked last, making the top corners plain left/right hits.
fn classify_edge(rect: Rect, x: u16, y: u16) -> Option<WindowEdge> {
    let last_col = rect.right().saturating_sub(1);
    let last_row = rect.bottom().saturating_sub(1);
    if y == last_row {
        if x == rect.x {
            Some(WindowEdge::BottomLeft)
        } else if x == last_col {
            Some(WindowEdge::BottomRight)
        } else {
            Some(WindowEdge::Bottom)
        }
    } else if x == rect.x {
        Some(WindowEdge::Left)
    } else if x == last_col {
        Some(WindowEdge::Right)
    } else if y == rect.y {
        Some(WindowEdge::Top)
    } else {
        None
    }
}

/// Re-derive a window rectangle that fits the viewport.
///
/// Origin is pulled to the viewport's top-left, size is floored at
/// [`MIN_WINDOW_WIDTH`]×[`MIN_WINDOW_HEIGHT`] and capped at the viewport
/// (always exactly the viewport when maximized), then the origin slides
/// left/up as needed so the bottom-right edge stays inside. Idempotent and
/// derived purely from the inputs.
fn clamp_to_viewport(rect: Rect, maximized: bool, viewport: Rect) -> Rect {
    let mut x = rect.x.max(viewport.x);
    let mut y = rect.y.max(viewport.y);
    let mut width = rect.width.max(MIN_WINDOW_WIDTH);
    let mut height = rect.height.max(MIN_WINDOW_HEIGHT);

    if width > viewport.width || maximized {
        width = viewport.width;
        x = viewport.x;
    }
    if height > viewport.height || maximized {
        height = viewport.height;
        y = viewport.y;
    }

    if x.saturating_add(width) > viewport.right() {
        x = viewport.right().saturating_sub(width);
    }
    if y.saturating_add(height) > viewport.bottom() {
        y = viewport.bottom().saturating_sub(height);
    }

    Rect::new(x, y, width, height)
}
