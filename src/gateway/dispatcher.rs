//! Executes gateway tickets off the UI thread.
//!
//! Each ticket runs on its own short-lived worker thread and its reply is sent
//! back over a channel that the event loop drains between input events. Calls
//! are not cancellable; stale replies are filtered by the search session.

use super::{execute, Gateway, Reply, Ticket};
use crate::model::GatewayError;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Where tickets are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One worker thread per ticket. Used by the terminal UI.
    Background,
    /// Run the call on the dispatching thread before returning. Used by tests.
    Inline,
}

/// Runs tickets against a gateway and collects their replies.
pub struct RequestDispatcher {
    gateway: Arc<dyn Gateway>,
    mode: DispatchMode,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl RequestDispatcher {
    /// Create a dispatcher over `gateway`.
    pub fn new(gateway: Arc<dyn Gateway>, mode: DispatchMode) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            gateway,
            mode,
            tx,
            rx,
        }
    }

    /// Start executing a ticket. Its reply shows up in a later `drain`.
    pub fn dispatch(&self, ticket: Ticket) {
        debug!(seq = ticket.seq.get(), request = ?ticket.request, "dispatching");

        match self.mode {
            DispatchMode::Inline => {
                let reply = execute(self.gateway.as_ref(), &ticket);
                // The receiver lives in self, so the send cannot fail here.
                let _ = self.tx.send(reply);
            }
            DispatchMode::Background => {
                let gateway = Arc::clone(&self.gateway);
                let tx = self.tx.clone();
                let pending = ticket.clone();
                let spawned = std::thread::Builder::new()
                    .name(format!("osq-request-{}", ticket.seq.get()))
                    .spawn(move || {
                        let reply = execute(gateway.as_ref(), &ticket);
                        if tx.send(reply).is_err() {
                            debug!("reply receiver dropped; discarding reply");
                        }
                    });
                if let Err(e) = spawned {
                    self.report_unstarted(&pending, &e);
                }
            }
        }
    }

    /// Answer a ticket whose worker never started with a failed reply, so the
    /// session stops waiting on it.
    fn report_unstarted(&self, ticket: &Ticket, err: &std::io::Error) {
        warn!(seq = ticket.seq.get(), error = %err, "failed to spawn request worker");
        let error = GatewayError::Unreachable(format!("could not start request: {}", err));
        let _ = self.tx.send(Reply::failure(ticket, error));
    }

    /// Take every reply that has arrived so far without blocking.
    pub fn drain(&self) -> Vec<Reply> {
        let mut replies = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(reply) => replies.push(reply),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        replies
    }

    /// Wait up to `timeout` for the next reply.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Reply> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
