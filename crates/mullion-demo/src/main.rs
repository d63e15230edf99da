#![forbid(unsafe_code)]

//! Interactive desktop showcase.
//!
//! Builds a small desktop of draggable, resizable windows and runs it over
//! crossterm: drag title bars to move, grab edges to resize, click `[x]` to
//! close, `[■]` to toggle maximize. `q` or Esc quits.

use std::io::{Write as _, stdout};
use std::time::Duration;

use crossterm::style::Color;
use crossterm::{cursor, event as ct_event, execute, queue, style, terminal};

use mullion::{
    Buffer, ButtonSide, ClickRecognizer, Event, KeyCode, PackedRgba, Rect, Result, Style,
    TextPane, WindowButton, WindowManager, map_crossterm_event,
};

/// Puts the terminal into raw/alternate/mouse mode and restores it on drop,
/// so panics and early returns both leave the terminal usable.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            ct_event::EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            cursor::Show,
            ct_event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn build_desktop(wm: &WindowManager) {
    let notes = wm.new_window();
    notes
        .set_rect(Rect::new(4, 2, 34, 12))
        .set_title("notes")
        .set_draggable(true)
        .set_resizable(true)
        .set_style(Style::new().bg(PackedRgba::rgb(20, 30, 48)))
        .host(TextPane::new(
            "Drag the title bar to move.\nGrab an edge to resize.\nClick [x] to close.",
        ));
    let closing = notes.clone();
    notes.add_button(WindowButton::new('x', ButtonSide::Right).on_click(move || {
        closing.hide();
    }));
    let zooming = notes.clone();
    notes.add_button(WindowButton::new('■', ButtonSide::Right).on_click(move || {
        if zooming.is_maximized() {
            zooming.restore();
        } else {
            zooming.maximize();
        }
    }));
    notes.show();

    let log = wm.new_window();
    log.set_rect(Rect::new(24, 9, 40, 11))
        .set_title("log")
        .set_draggable(true)
        .set_resizable(true)
        .set_style(Style::new().bg(PackedRgba::rgb(32, 24, 40)))
        .host(TextPane::new("Windows clamp to the viewport\non every frame."));
    log.show();
    log.focus();
}

fn present(buf: &Buffer) -> Result<()> {
    let mut out = stdout();
    queue!(out, cursor::MoveTo(0, 0))?;
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            let Some(cell) = buf.get(x, y) else {
                continue;
            };
            if cell.is_continuation() {
                continue;
            }
            queue!(
                out,
                cursor::MoveTo(x, y),
                style::SetForegroundColor(to_color(cell.fg).unwrap_or(Color::Reset)),
                style::SetBackgroundColor(to_color(cell.bg).unwrap_or(Color::Reset)),
                style::Print(cell.ch)
            )?;
        }
    }
    queue!(out, style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn to_color(color: PackedRgba) -> Option<Color> {
    if color.is_transparent() {
        return None;
    }
    Some(Color::Rgb {
        r: color.r(),
        g: color.g(),
        b: color.b(),
    })
}

fn main() -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let (cols, rows) = terminal::size()?;

    let wm = WindowManager::new();
    wm.set_rect(Rect::new(0, 0, cols, rows))
        .set_style(Style::new().bg(PackedRgba::rgb(12, 12, 16)));
    build_desktop(&wm);

    let mut buf = Buffer::new(cols, rows);
    let mut clicks = ClickRecognizer::new();

    loop {
        respawn_if_empty(&wm);
        buf.clear();
        wm.draw(&mut buf);
        present(&buf)?;

        if !ct_event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Some(event) = map_crossterm_event(ct_event::read()?) else {
            continue;
        };
        match event {
            Event::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                break;
            }
            Event::Mouse(mouse) => {
                wm.handle_mouse(&mouse);
                // Terminals report no click action; synthesize it so
                // title-bar buttons respond.
                if let Some(click) = clicks.observe(&mouse) {
                    wm.handle_mouse(&click);
                }
            }
            Event::Resize(new_cols, new_rows) if new_cols > 0 && new_rows > 0 => {
                wm.set_rect(Rect::new(0, 0, new_cols, new_rows));
                buf = Buffer::new(new_cols, new_rows);
            }
            _ => {}
        }
    }

    Ok(())
}

/// Reopen a window when everything has been closed, so the demo is never an
/// empty screen with no affordances.
fn respawn_if_empty(wm: &WindowManager) {
    if wm.window_count() == 0 {
        let window = wm.new_window();
        window
            .set_rect(Rect::new(10, 4, 30, 8))
            .set_title("welcome back")
            .set_draggable(true)
            .host(TextPane::new("All windows were closed."));
        window.show();
    }
}
