use crate::job::{Core, JobHandle, JobId, PriorityHint, Work};
use std::fmt;
use std::sync::Arc;

/// Producer-side handle to a job created with a pooled completion event.
///
/// Everything a [`JobHandle`] offers, plus blocking until the pool is done
/// with the job.
pub struct WaitableHandle<W: Work> {
    inner: JobHandle<W>,
}

impl<W: Work> WaitableHandle<W> {
    pub(crate) fn new(inner: JobHandle<W>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> JobId {
        self.inner.id()
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn priority(&self) -> PriorityHint {
        self.inner.priority()
    }

    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }

    pub fn is_canceled(&self) -> bool {
        self.inner.is_canceled()
    }

    pub fn was_abandoned(&self) -> bool {
        self.inner.was_abandoned()
    }

    /// Blocks the calling thread until the job's completion event triggers.
    ///
    /// The event triggers on every done transition: a clean completion
    /// (right after the payload's `complete` hook has finished), a canceled
    /// execution, and an abandon. Triggering on the latter two makes `wait`
    /// return even for jobs that never ran their payload; waiters can check
    /// [`is_canceled`](Self::is_canceled) and
    /// [`was_abandoned`](Self::was_abandoned) afterwards. There is no
    /// timeout variant.
    pub fn wait(&self) {
        wait_on(self.inner.core());
    }

    /// Waits for completion, then reclaims the payload.
    pub fn wait_and_take(self) -> W {
        self.wait();
        match self.inner.try_take() {
            Ok(work) => work,
            // `wait` returned, so the job is done and `try_take` cannot
            // hand the handle back.
            Err(handle) => panic!("job `{}` done but payload not reclaimable", handle.name()),
        }
    }

    /// Creates a wait-only handle that other threads can block on while the
    /// producer keeps (or cancels) this one.
    pub fn waiter(&self) -> Waiter<W> {
        Waiter {
            core: self.inner.core_arc(),
        }
    }

    /// See [`JobHandle::cancel_and_autodelete`]. Waiters blocked on this job
    /// are woken once the worker side finishes with it.
    pub fn cancel_and_autodelete(self) -> bool {
        self.inner.cancel_and_autodelete()
    }

    /// Discards wait support, keeping the plain producer handle.
    pub fn into_inner(self) -> JobHandle<W> {
        self.inner
    }
}

impl<W: Work> fmt::Debug for WaitableHandle<W> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("WaitableHandle")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("done", &self.is_done())
            .finish()
    }
}

/// A wait-only view of a waitable job.
///
/// Holding a waiter keeps the job's completion event alive, so the event is
/// never recycled out from under a blocked thread.
pub struct Waiter<W: Work> {
    core: Arc<Core<W>>,
}

impl<W: Work> Waiter<W> {
    /// See [`WaitableHandle::wait`].
    pub fn wait(&self) {
        wait_on(&self.core);
    }

    pub fn is_done(&self) -> bool {
        self.core.is_done()
    }

    pub fn is_canceled(&self) -> bool {
        self.core.is_canceled()
    }

    pub fn was_abandoned(&self) -> bool {
        self.core.was_abandoned()
    }
}

impl<W: Work> Clone for Waiter<W> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<W: Work> fmt::Debug for Waiter<W> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Waiter")
            .field("id", &self.core.id)
            .field("done", &self.is_done())
            .finish()
    }
}

fn wait_on<W>(core: &Core<W>) {
    match core.event() {
        Some(event) => event.wait(),
        // Unreachable through the public constructors; waitable handles are
        // only ever built around a core that holds an event.
        None => panic!("job `{}` ({}) has no completion event", core.name, core.id),
    }

    assert!(
        core.is_done(),
        "completion event for job `{}` ({}) triggered before the job was done",
        core.name,
        core.id
    );
}
