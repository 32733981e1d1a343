//! Manual-reset binary completion signal, recycled through a process-global
//! pool.

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::OnceLock;

/// Number of idle events the global pool keeps around for reuse.
const MAX_POOLED_EVENTS: usize = 64;

/// A manual-reset binary signal.
///
/// Once triggered the event stays signaled until [`reset`](Event::reset);
/// `wait` returns immediately on an already-signaled event and `trigger` is
/// idempotent.
pub struct Event {
    signaled: Mutex<bool>,
    cond: Condvar,
}

impl Event {
    /// Creates an unsignaled event.
    pub fn new() -> Self {
        Self {
            signaled: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    /// Forces the event back to the unsignaled state.
    pub fn reset(&self) {
        *self.signaled.lock() = false;
    }

    /// Signals the event, waking every waiter.
    pub fn trigger(&self) {
        let mut signaled = self.signaled.lock();
        if !*signaled {
            *signaled = true;
            self.cond.notify_all();
        }
    }

    /// Blocks the calling thread until the event is signaled.
    pub fn wait(&self) {
        let mut signaled = self.signaled.lock();
        while !*signaled {
            self.cond.wait(&mut signaled);
        }
    }

    pub fn is_signaled(&self) -> bool {
        *self.signaled.lock()
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Event")
            .field("signaled", &self.is_signaled())
            .finish()
    }
}

/// Free list of reusable events, mirroring platform synch-event pools:
/// acquiring always yields an unsignaled event, releasing parks it for the
/// next job.
pub struct EventPool {
    free: Mutex<Vec<Event>>,
}

impl EventPool {
    /// The process-global pool used by waitable jobs.
    pub fn global() -> &'static EventPool {
        static POOL: OnceLock<EventPool> = OnceLock::new();
        POOL.get_or_init(EventPool::new)
    }

    pub fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }

    /// Pops a pooled event, or creates one. Always returned unsignaled.
    pub fn acquire(&self) -> Event {
        let event = self.free.lock().pop().unwrap_or_default();
        event.reset();
        event
    }

    /// Returns an event to the free list. Beyond the pool bound the event
    /// is simply dropped.
    pub fn release(&self, event: Event) {
        let mut free = self.free.lock();
        if free.len() < MAX_POOLED_EVENTS {
            free.push(event);
        }
    }

    #[cfg(test)]
    fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl Default for EventPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventPool {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("EventPool")
            .field("free", &self.free.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_trigger_is_idempotent_and_wait_returns_immediately() {
        let event = Event::new();
        assert!(!event.is_signaled());

        event.trigger();
        event.trigger();

        assert!(event.is_signaled());
        event.wait();
    }

    #[test]
    fn test_wait_blocks_until_trigger() -> Result<()> {
        let event = Arc::new(Event::new());

        let waiter = {
            let event = event.clone();
            thread::spawn(move || event.wait())
        };

        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());

        event.trigger();
        waiter.join().map_err(|_| anyhow!("waiter panicked"))?;
        Ok(())
    }

    #[test]
    fn test_reset_unsignals() {
        let event = Event::new();
        event.trigger();
        event.reset();
        assert!(!event.is_signaled());
    }

    #[test]
    fn test_pool_recycles_events_unsignaled() {
        let pool = EventPool::new();

        let event = pool.acquire();
        event.trigger();
        pool.release(event);
        assert_eq!(pool.idle(), 1);

        let event = pool.acquire();
        assert!(!event.is_signaled());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_pool_is_bounded() {
        let pool = EventPool::new();

        for _ in 0..(MAX_POOLED_EVENTS + 8) {
            pool.release(Event::new());
        }

        assert_eq!(pool.idle(), MAX_POOLED_EVENTS);
    }
}
