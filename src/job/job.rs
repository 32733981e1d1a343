use crate::job::{Core, JobId, PriorityHint, Work};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The pool-side unit of work. Uniquely owns the payload.
///
/// The external pool must call exactly one of [`execute`](Job::execute) or
/// [`abandon`](Job::abandon) per job. Both consume the job, so a second call
/// is unrepresentable; after either returns the pool must not touch the job
/// again.
pub struct Job<W: Work> {
    work: W,
    core: Arc<Core<W>>,
}

impl<W: Work> Job<W> {
    pub(crate) fn new(work: W, core: Arc<Core<W>>) -> Self {
        Self { work, core }
    }

    pub fn id(&self) -> JobId {
        self.core.id
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    pub fn priority(&self) -> PriorityHint {
        self.core.priority
    }

    /// Runs the payload to completion.
    ///
    /// `run` executes first, outside the lock, since it may block for a long
    /// time. The done transition, the `complete` hook and the completion
    /// trigger all happen inside one critical section, so no cancellation or
    /// teardown can interleave with them. A cancellation that landed before
    /// a hook started suppresses that hook, but never the done transition.
    pub fn execute(self) {
        let Job { mut work, core } = self;
        assert!(
            !core.is_done(),
            "job `{}` ({}) executed after completion",
            core.name,
            core.id
        );

        if !core.is_canceled() {
            trace!(id = %core.id, name = %core.name, "running job payload");
            work.run();
        }

        let mut lifecycle = core.lifecycle.lock();
        core.set_done();

        // Re-check under the lock: a cancel may have landed while `run` was
        // in flight, in which case finalization must not fire.
        if !core.is_canceled() {
            work.complete();
        }
        core.trigger_event();

        if lifecycle.autodelete {
            trace!(id = %core.id, name = %core.name, "job finished, dropping payload");
            drop(lifecycle);
            drop(work);
        } else {
            trace!(id = %core.id, name = %core.name, "job finished, payload parked for producer");
            lifecycle.handoff = Some(work);
            drop(lifecycle);
        }
    }

    /// Discards the job without running the payload, for pools that shut
    /// down before the job was scheduled. No finalization hook runs.
    pub fn abandon(self) {
        let Job { work, core } = self;
        assert!(
            !core.is_done(),
            "job `{}` ({}) abandoned after completion",
            core.name,
            core.id
        );

        let mut lifecycle = core.lifecycle.lock();
        core.set_done();
        core.set_abandoned();
        core.trigger_event();

        debug!(id = %core.id, name = %core.name, "job abandoned");
        if lifecycle.autodelete {
            drop(lifecycle);
            drop(work);
        } else {
            lifecycle.handoff = Some(work);
            drop(lifecycle);
        }
    }
}

impl<W: Work> fmt::Debug for Job<W> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Job")
            .field("id", &self.core.id)
            .field("name", &self.core.name)
            .finish()
    }
}
