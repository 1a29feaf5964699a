//! Observable console state.
//!
//! [`ConsoleState`] is the single container the front end renders from. It
//! holds the current [`ConsoleView`] and hands out any number of
//! subscriptions that wake on every change.

use serde::Serialize;
use tokio::sync::watch;

use crate::domain::{ConnectionState, SystemStatusSnapshot, TargetState};

/// Receives connection-indicator changes from the status stream.
pub trait ConnectionObserver: Send + Sync {
    fn connection_changed(&self, state: ConnectionState);
}

/// Everything the console displays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsoleView {
    /// Link to the control plane.
    pub connection: ConnectionState,
    /// Last authoritative snapshot from the status stream.
    pub snapshot: Option<SystemStatusSnapshot>,
    /// Displayed halted indicator. Follows the snapshot, except between a
    /// successful command and the next push.
    pub halted: bool,
    /// A privileged command is awaiting its response.
    pub command_pending: bool,
    /// Message from the last failed command, if any.
    pub last_error: Option<String>,
    /// Message from the last successful command, if any.
    pub last_message: Option<String>,
}

/// Shared, observable console state.
#[derive(Debug)]
pub struct ConsoleState {
    tx: watch::Sender<ConsoleView>,
}

impl ConsoleState {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ConsoleView::default());
        Self { tx }
    }

    /// Copy of the current view.
    #[must_use]
    pub fn view(&self) -> ConsoleView {
        self.tx.borrow().clone()
    }

    /// Subscribe to changes. The receiver starts with the current view
    /// marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ConsoleView> {
        self.tx.subscribe()
    }

    pub fn set_connection(&self, connection: ConnectionState) {
        self.tx.send_if_modified(|view| {
            if view.connection == connection {
                return false;
            }
            view.connection = connection;
            true
        });
    }

    /// Replace the snapshot with a fresh push. The push is authoritative and
    /// overwrites any optimistic halted value.
    pub fn apply_snapshot(&self, snapshot: SystemStatusSnapshot) {
        self.tx.send_modify(|view| {
            view.halted = snapshot.is_halted();
            view.snapshot = Some(snapshot);
        });
    }

    /// Flip the halted indicator ahead of the stream after an accepted
    /// command.
    pub fn apply_optimistic(&self, target: TargetState) {
        self.tx.send_modify(|view| {
            view.halted = target == TargetState::Halted;
        });
    }

    pub fn set_command_pending(&self, pending: bool) {
        self.tx.send_if_modified(|view| {
            if view.command_pending == pending {
                return false;
            }
            view.command_pending = pending;
            true
        });
    }

    pub fn report_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|view| {
            view.last_error = Some(message);
            view.last_message = None;
        });
    }

    pub fn report_success(&self, message: impl Into<String>) {
        let message = message.into();
        self.tx.send_modify(|view| {
            view.last_error = None;
            view.last_message = Some(message);
        });
    }
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionObserver for ConsoleState {
    fn connection_changed(&self, state: ConnectionState) {
        self.set_connection(state);
    }
}
