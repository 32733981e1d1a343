use std::sync::Arc;

use crate::event::EventPool;

// Public API
mod handle;
pub use self::handle::JobHandle;

pub mod id;
pub use self::id::JobId;

mod waitable;
pub use self::waitable::{WaitableHandle, Waiter};

pub mod work;
pub use self::work::Work;

// Internals
mod core;
pub(crate) use self::core::Core;

mod job;
pub use self::job::Job;


/// Scheduling hint forwarded to pool diagnostics. Opaque to this crate; it
/// never affects the lifecycle protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct PriorityHint(pub f64);

/// Creates a job whose finished payload is handed back to the producer.
///
/// The returned [`Job`] goes to the pool; the [`JobHandle`] stays with the
/// producer for cancellation and payload reclamation.
pub fn new_job<W: Work>(
    name: impl Into<Arc<str>>,
    priority: PriorityHint,
    work: W,
) -> (Job<W>, JobHandle<W>) {
    let core = Arc::new(Core::new(name.into(), priority, false, None));
    (Job::new(work, core.clone()), JobHandle::new(core))
}

/// Creates a job with a pooled completion event, so threads can block until
/// the pool is done with it.
pub fn new_waitable_job<W: Work>(
    name: impl Into<Arc<str>>,
    priority: PriorityHint,
    work: W,
) -> (Job<W>, WaitableHandle<W>) {
    let event = EventPool::global().acquire();
    let core = Arc::new(Core::new(name.into(), priority, false, Some(event)));
    (
        Job::new(work, core.clone()),
        WaitableHandle::new(JobHandle::new(core)),
    )
}

/// Creates a fire-and-forget job: the worker side always drops the payload
/// and no producer handle exists, so cancellation is not possible.
pub fn new_detached_job<W: Work>(
    name: impl Into<Arc<str>>,
    priority: PriorityHint,
    work: W,
) -> Job<W> {
    let core = Arc::new(Core::new(name.into(), priority, true, None));
    Job::new(work, core)
}
