//! Stale-response protection for assistant requests.
//!
//! Every request takes a [`Ticket`] from a [`RequestGate`]. Starting a new
//! request, or invalidating the gate when its view goes away, retires all
//! older tickets, so a slow response that arrives after a newer request
//! started is dropped instead of overwriting the newer result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    generation: Arc<AtomicU64>,
}

/// Proof that a request was started at a particular generation.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, retiring every earlier ticket.
    pub fn begin(&self) -> Ticket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Retire all outstanding tickets without starting a new request.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Holds the result of the most recently started request.
#[derive(Debug)]
pub struct Latest<T> {
    gate: RequestGate,
    value: Option<T>,
    pending: bool,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self {
            gate: RequestGate::new(),
            value: None,
            pending: false,
        }
    }

    /// Start a request. The previous value stays visible until the new
    /// one lands.
    pub fn begin(&mut self) -> Ticket {
        self.pending = true;
        self.gate.begin()
    }

    /// Store `value` if `ticket` is still current. Returns whether it was
    /// applied.
    pub fn apply(&mut self, ticket: &Ticket, value: T) -> bool {
        if !ticket.is_current() {
            tracing::debug!(generation = ticket.generation(), "discarding stale response");
            return false;
        }
        self.value = Some(value);
        self.pending = false;
        true
    }

    /// Drop interest in all in-flight requests.
    pub fn detach(&mut self) {
        self.gate.invalidate();
        self.pending = false;
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether a request is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
