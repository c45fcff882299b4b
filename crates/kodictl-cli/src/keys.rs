//! Fixed translation table from physical key events to session actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use kodictl_rpc::RemoteCommand;

/// What the session loop should do with one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Dispatch a navigation command to the device.
    Send(RemoteCommand),
    /// Leave the session loop.
    Quit,
    /// Unmapped key; the loop keeps running and nothing is sent.
    Ignore,
}

/// Maps one key event to its action.
///
/// The table is closed: arrows navigate, Enter selects, Backspace/Delete
/// go back, `c` opens the context menu, and `q`, Escape, or Ctrl+C end the
/// session. Everything else is ignored. Guards on
/// [`KeyEventKind::Press`] to avoid double-fire on terminals that report
/// key releases.
#[must_use]
pub fn translate(key: &KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }
    match key.code {
        // Raw mode disables ISIG, so Ctrl+C arrives here as a key event.
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Right => Action::Send(RemoteCommand::Right),
        KeyCode::Left => Action::Send(RemoteCommand::Left),
        KeyCode::Up => Action::Send(RemoteCommand::Up),
        KeyCode::Down => Action::Send(RemoteCommand::Down),
        KeyCode::Enter => Action::Send(RemoteCommand::Select),
        KeyCode::Backspace | KeyCode::Delete => Action::Send(RemoteCommand::Back),
        KeyCode::Char('c') => Action::Send(RemoteCommand::Menu),
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::Ignore,
    }
}
