use crate::job::{Core, JobId, PriorityHint, Work};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Producer-side handle to a submitted job.
///
/// Dropping the handle without taking the payload *detaches* from the job:
/// the worker side keeps the lifecycle honest and the payload is dropped
/// with the last reference, still exactly once.
pub struct JobHandle<W: Work> {
    core: Arc<Core<W>>,
}

impl<W: Work> JobHandle<W> {
    pub(crate) fn new(core: Arc<Core<W>>) -> Self {
        Self { core }
    }

    pub(crate) fn core(&self) -> &Core<W> {
        &self.core
    }

    pub(crate) fn core_arc(&self) -> Arc<Core<W>> {
        self.core.clone()
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

    /// Whether the worker side has finished with the job, via either
    /// `execute` or `abandon`.
    pub fn is_done(&self) -> bool {
        self.core.is_done()
    }

    pub fn is_canceled(&self) -> bool {
        self.core.is_canceled()
    }

    pub fn was_abandoned(&self) -> bool {
        self.core.was_abandoned()
    }

    /// Cancels the job and hands drop responsibility to whichever side
    /// finishes last.
    ///
    /// Cancellation is cooperative: a payload already inside `run` keeps
    /// running, but any hook that has not started yet is suppressed.
    ///
    /// Returns `true` if the job was already done at the instant of the
    /// call; the payload has then been dropped as part of this call and the
    /// job is gone. Returns `false` if the worker side has not finished yet;
    /// it will observe the ownership transfer and drop the payload itself.
    ///
    /// Consuming the handle makes a second cancel unrepresentable.
    pub fn cancel_and_autodelete(self) -> bool {
        let core = self.core;

        let mut lifecycle = core.lifecycle.lock();
        debug_assert!(!lifecycle.autodelete);
        lifecycle.autodelete = true;
        core.set_canceled();

        debug!(id = %core.id, name = %core.name, done = core.is_done(), "job canceled");
        if core.is_done() {
            let parked = lifecycle.handoff.take();
            drop(lifecycle);
            drop(parked);
            true
        } else {
            false
        }
    }

    /// Reclaims the payload once the job is done; before that, hands the
    /// handle back.
    ///
    /// # Panics
    ///
    /// Panics if the job is done but the payload is missing. That means
    /// another actor already consumed it, which violates the single-owner
    /// handoff contract.
    pub fn try_take(self) -> Result<W, Self> {
        if !self.core.is_done() {
            return Err(self);
        }

        let mut lifecycle = self.core.lifecycle.lock();
        match lifecycle.handoff.take() {
            Some(work) => {
                drop(lifecycle);
                Ok(work)
            }
            None => panic!(
                "job `{}` ({}) payload already reclaimed",
                self.core.name, self.core.id
            ),
        }
    }
}

impl<W: Work> fmt::Debug for JobHandle<W> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("JobHandle")
            .field("id", &self.core.id)
            .field("name", &self.core.name)
            .field("done", &self.is_done())
            .finish()
    }
}
