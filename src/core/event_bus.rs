//! Typed event queue used as an input port.
//!
//! Architecture:
//! - UI code holds an `EventEmitter<E>` and emits events while handling egui input
//! - The owner of the `EventBus<E>` drains the queue with poll() once per frame
//!
//! Events are delivered in emission order. Tests drive consumers by emitting
//! synthetic events directly, no display surface needed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::warn;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

type Queue<E> = Arc<Mutex<VecDeque<E>>>;

fn push_bounded<E>(queue: &Queue<E>, event: E) {
    let mut queue = queue.lock().unwrap_or_else(|e| e.into_inner());
    if queue.len() >= MAX_QUEUE_SIZE {
        let evict_count = queue.len() / 2;
        warn!("Event queue full ({} events), evicting oldest {}", queue.len(), evict_count);
        queue.drain(0..evict_count);
    }
    queue.push_back(event);
}

/// Receiving side of an input port.
pub struct EventBus<E> {
    queue: Queue<E>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queue an event.
    pub fn emit(&self, event: E) {
        push_bounded(&self.queue, event);
    }

    /// Take all queued events, oldest first.
    pub fn poll(&self) -> Vec<E> {
        self.queue
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .drain(..)
            .collect()
    }

    /// Get an emitter handle for passing to UI components.
    pub fn emitter(&self) -> EventEmitter<E> {
        EventEmitter {
            queue: Arc::clone(&self.queue),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn clear(&self) {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

/// Lightweight emitter handle for UI components.
pub struct EventEmitter<E> {
    queue: Queue<E>,
}

// Manual impl: cloning the handle must not require `E: Clone`
impl<E> Clone for EventEmitter<E> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<E> std::fmt::Debug for EventEmitter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl<E> EventEmitter<E> {
    pub fn emit(&self, event: E) {
        push_bounded(&self.queue, event);
    }
}
