use crate::event::{Event, EventPool};
use crate::job::{JobId, PriorityHint};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// State shared between the pool-side [`Job`](crate::job::Job) and the
/// producer-side handles.
///
/// The lifecycle mutex totally orders every transition of `done` and
/// `autodelete` together with the payload-drop decision. The atomic flags
/// mirror the transitions for lock-free observation; the mutex is what makes
/// them exclusive.
pub(crate) struct Core<W> {
    pub(crate) id: JobId,
    pub(crate) name: Arc<str>,
    pub(crate) priority: PriorityHint,
    done: AtomicBool,
    abandoned: AtomicBool,
    canceled: AtomicBool,
    pub(crate) lifecycle: Mutex<Lifecycle<W>>,
    event: Option<Event>,
}

pub(crate) struct Lifecycle<W> {
    /// Once true, the worker side drops the payload instead of parking it
    /// for the producer. True from construction for detached jobs, otherwise
    /// set only by cancellation.
    pub(crate) autodelete: bool,
    /// The finished payload, parked here on the non-autodelete path until
    /// the producer reclaims it.
    pub(crate) handoff: Option<W>,
}

impl<W> Core<W> {
    pub(crate) fn new(
        name: Arc<str>,
        priority: PriorityHint,
        autodelete: bool,
        event: Option<Event>,
    ) -> Self {
        Self {
            id: JobId::next(),
            name,
            priority,
            done: AtomicBool::new(false),
            abandoned: AtomicBool::new(false),
            canceled: AtomicBool::new(false),
            lifecycle: Mutex::new(Lifecycle {
                autodelete,
                handoff: None,
            }),
            event,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }

    pub(crate) fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }

    pub(crate) fn was_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::Acquire)
    }

    /// Marks the job done. The caller must hold the lifecycle lock; this
    /// store only publishes the transition to lock-free readers.
    pub(crate) fn set_done(&self) {
        debug_assert!(!self.is_done());
        self.done.store(true, Ordering::Release);
    }

    /// Caller must hold the lifecycle lock.
    pub(crate) fn set_abandoned(&self) {
        self.abandoned.store(true, Ordering::Release);
    }

    /// Caller must hold the lifecycle lock.
    pub(crate) fn set_canceled(&self) {
        self.canceled.store(true, Ordering::Release);
    }

    pub(crate) fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    /// Wakes any waiters. Triggering is idempotent, so every done path may
    /// call this unconditionally.
    pub(crate) fn trigger_event(&self) {
        if let Some(event) = &self.event {
            event.trigger();
        }
    }
}

impl<W> Drop for Core<W> {
    fn drop(&mut self) {
        // A finisher on another thread may still be between setting `done`
        // and releasing the lifecycle lock. Take the lock once so teardown
        // happens strictly after that critical section.
        drop(self.lifecycle.lock());

        assert!(
            self.is_done(),
            "job `{}` ({}) destroyed before completion",
            self.name,
            self.id
        );

        if let Some(event) = self.event.take() {
            EventPool::global().release(event);
        }
    }
}
