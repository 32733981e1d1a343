//! Cancelable units of blocking work for external thread pools.
//!
//! A [`Job`] is handed to an external pool, which must call exactly one of
//! [`Job::execute`] or [`Job::abandon`], exactly once. The producer keeps a
//! [`JobHandle`] to request cooperative cancellation or to reclaim the
//! finished payload, and waitable jobs carry a pooled completion
//! [`Event`](event::Event) so another thread can block until the work is
//! done. The payload is dropped exactly once no matter how cancellation
//! races against completion.

pub mod event;

pub mod job;
pub use job::work::{from_fn, Work};
pub use job::{new_detached_job, new_job, new_waitable_job};
pub use job::{Job, JobHandle, JobId, PriorityHint, WaitableHandle, Waiter};
