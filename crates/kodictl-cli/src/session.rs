//! Interactive session: raw terminal acquisition and the key event loop.
//!
//! The loop is strictly synchronous. It blocks on the next key event (via
//! a short poll so an interrupt flag can be observed), translates it, and
//! fully resolves at most one RPC call before polling again. A failed call
//! never changes loop state; the only exits are the quit keys, Escape, or
//! an interrupt signal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use crossterm::terminal;
use kodictl_rpc::RemoteClient;

use crate::keys::{self, Action};

/// Set by the signal handler; checked between event polls so a SIGINT
/// delivered while waiting for input terminates the session cleanly.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// How long one event poll waits before re-checking the interrupt flag.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Scoped raw-mode acquisition. Cooked mode is restored in `Drop`, which
/// covers every exit path: quit keys, interrupt, and errors unwinding out
/// of the loop.
#[derive(Debug)]
pub struct RawModeGuard(());

impl RawModeGuard {
    /// Switches the terminal into raw mode.
    ///
    /// # Errors
    ///
    /// Returns the underlying terminal error; the session cannot run
    /// without raw key reporting, so the caller treats this as fatal.
    pub fn acquire() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::error!(error = %err, "failed to restore terminal mode");
        }
    }
}

/// Whether the loop keeps running after one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Running,
    Terminated,
}

/// Observes the interrupt flag between event polls. A set flag is
/// absorbing: the loop terminates before reading any further key event.
fn check_interrupt(flag: &AtomicBool) -> LoopControl {
    if flag.load(Ordering::SeqCst) {
        LoopControl::Terminated
    } else {
        LoopControl::Running
    }
}

/// Handles a single key event: dispatches at most one command and decides
/// whether the loop continues. Call failures are already absorbed by the
/// client, so they leave the loop running.
fn step(client: &RemoteClient, key: &KeyEvent, verbose: bool) -> LoopControl {
    if verbose {
        eprint!("{key:?}\r\n");
    }
    match keys::translate(key) {
        Action::Send(command) => {
            let _ = client.dispatch(command);
            LoopControl::Running
        }
        Action::Quit => LoopControl::Terminated,
        Action::Ignore => LoopControl::Running,
    }
}

/// Runs the interactive session against one device.
///
/// # Errors
///
/// Returns an error if the interrupt handler cannot be installed, raw
/// mode cannot be acquired, or the terminal event stream itself fails.
/// Remote-call failures are not errors at this level.
pub fn run(client: &RemoteClient, verbose: bool) -> anyhow::Result<()> {
    ctrlc::set_handler(|| INTERRUPTED.store(true, Ordering::SeqCst))
        .map_err(|e| anyhow::anyhow!("failed to install interrupt handler: {e}"))?;

    {
        let guard = RawModeGuard::acquire()
            .map_err(|e| anyhow::anyhow!("failed to enter raw terminal mode: {e}"))?;
        tracing::debug!(endpoint = %client.endpoint(), "session started");

        while check_interrupt(&INTERRUPTED) == LoopControl::Running {
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if step(client, &key, verbose) == LoopControl::Terminated {
                break;
            }
        }
        drop(guard);
    }

    println!("Quitting...");
    Ok(())
}
