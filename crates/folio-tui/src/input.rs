//! Terminal input to intent mapping.
//!
//! Pure translation: no state is consulted here. Pointer intents carry
//! screen coordinates; the reducer resolves them against the layout.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::events::Intent;
use crate::features::page::MOUSE_SCROLL_LINES;

pub fn intent_for(event: &Event) -> Option<Intent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_intent(*key),
        Event::Mouse(mouse) => mouse_intent(*mouse),
        _ => None,
    }
}

fn key_intent(key: KeyEvent) -> Option<Intent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let intent = match key.code {
        KeyCode::Char('c') if ctrl => Intent::Quit,
        KeyCode::Char('q') => Intent::Quit,
        KeyCode::Esc => Intent::CollapseProject,
        KeyCode::Up | KeyCode::Char('k') => Intent::ScrollBy(-1),
        KeyCode::Down | KeyCode::Char('j') => Intent::ScrollBy(1),
        KeyCode::PageUp => Intent::ScrollPage(-1),
        KeyCode::PageDown => Intent::ScrollPage(1),
        KeyCode::Home | KeyCode::Char('g') => Intent::ScrollToTop,
        KeyCode::End | KeyCode::Char('G') => Intent::ScrollToBottom,
        KeyCode::Tab => Intent::FocusNext,
        KeyCode::BackTab => Intent::FocusPrev,
        KeyCode::Enter => Intent::ActivateFocus,
        KeyCode::Char(' ' | 's') => Intent::SkipReveal,
        KeyCode::Char('o') => Intent::OpenVideo,
        KeyCode::Char(digit @ '1'..='9') => {
            Intent::ActivateNav(digit as usize - '1' as usize)
        }
        _ => return None,
    };
    Some(intent)
}

fn mouse_intent(mouse: MouseEvent) -> Option<Intent> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Intent::ScrollBy(-MOUSE_SCROLL_LINES)),
        MouseEventKind::ScrollDown => Some(Intent::ScrollBy(MOUSE_SCROLL_LINES)),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            Some(Intent::PointerMoved { column, row })
        }
        MouseEventKind::Down(MouseButton::Left) => Some(Intent::Click { column, row }),
        _ => None,
    }
}
