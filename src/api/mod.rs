pub mod models;
pub mod models_ws;
pub mod routes;
pub mod websocket;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::store::SessionStore;

/// Shared chat state: the transcript plus the single-slot in-flight guard.
/// Only one analyst exchange may be outstanding for the transcript at a time;
/// the guard belongs to the callers of the gateway, not to the gateway itself.
pub struct ChatState {
    pub store: Mutex<SessionStore>,
    busy: AtomicBool,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(SessionStore::new()),
            busy: AtomicBool::new(false),
        }
    }

    /// Claims the exchange slot. Returns `None` while a previous exchange is
    /// still in flight; the slot frees when the returned guard drops.
    pub fn begin_exchange(&self) -> Option<InFlightGuard<'_>> {
        if self.busy.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(InFlightGuard { state: self })
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct InFlightGuard<'a> {
    state: &'a ChatState,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::Release);
    }
}
