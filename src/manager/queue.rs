//! Outbound message queue.
//!
//! Buffers messages submitted while no connected channel exists. Strictly
//! FIFO: insertion order is delivery order. Unbounded — growth while
//! disconnected is an accepted risk.

// ============================================================================
// Imports
// ============================================================================

use std::collections::VecDeque;

use crate::protocol::OutboundMessage;

// ============================================================================
// OutboundQueue
// ============================================================================

/// FIFO buffer for messages awaiting a connected channel.
#[derive(Debug, Default)]
pub(crate) struct OutboundQueue {
    messages: VecDeque<OutboundMessage>,
}

impl OutboundQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a message at the tail.
    pub(crate) fn push(&mut self, message: OutboundMessage) {
        self.messages.push_back(message);
    }

    /// Removes and returns the head message.
    pub(crate) fn pop(&mut self) -> Option<OutboundMessage> {
        self.messages.pop_front()
    }

    /// Puts a message back at the head.
    ///
    /// Used when the handle vanishes mid-flush; the message keeps its place
    /// for the next successful connection.
    pub(crate) fn requeue(&mut self, message: OutboundMessage) {
        self.messages.push_front(message);
    }

    pub(crate) fn len(&self) -> usize {
        self.messages.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
