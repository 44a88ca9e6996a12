// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Sim Session Manager Contributors

//! Single-slot status mailbox read by the presentation layer

use std::sync::Arc;

use tokio::sync::watch;

use sim_session_common::StatusMessage;

/// Last-write-wins status slot.
///
/// Cloneable so background tasks can report completions from another
/// task or thread. No history and no subscriptions: the presentation
/// layer polls [`current`](StatusSink::current) after each controller
/// call, and a delayed background write may overwrite the message of a
/// later command.
#[derive(Debug, Clone)]
pub struct StatusSink {
    tx: Arc<watch::Sender<StatusMessage>>,
    rx: watch::Receiver<StatusMessage>,
}

impl StatusSink {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(StatusMessage::empty());
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Overwrite the slot
    pub fn report(&self, message: StatusMessage) {
        self.tx.send_replace(message);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.report(StatusMessage::info(text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.report(StatusMessage::error(text));
    }

    /// The last reported message, empty at startup
    pub fn current(&self) -> StatusMessage {
        self.rx.borrow().clone()
    }
}

impl Default for StatusSink {
    fn default() -> Self {
        Self::new()
    }
}
