use std::fmt;

/// A unit of blocking work executed by an external pool worker.
///
/// `run` is the payload proper: it is invoked at most once, with no lock
/// held, and may block arbitrarily. `complete` is a short finalization hook
/// invoked under the job's lifecycle lock right after the job is marked
/// done, so nothing can observe a done job whose finalization is still
/// pending. It must be fast and must not call back into the job's own
/// operations. For waitable jobs, `complete` runs immediately before the
/// completion event triggers.
///
/// Both hooks are suppressed when the job was canceled before they started;
/// the done transition itself is never suppressed.
pub trait Work: Send + 'static {
    fn run(&mut self);

    fn complete(&mut self) {}
}

// Lets heterogeneous payloads share one queue type on the pool side.
impl Work for Box<dyn Work> {
    fn run(&mut self) {
        (**self).run()
    }

    fn complete(&mut self) {
        (**self).complete()
    }
}

/// Adapts a closure into a [`Work`] payload with a no-op `complete`.
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnOnce() + Send + 'static,
{
    FromFn { f: Some(f) }
}

/// See [`from_fn`].
pub struct FromFn<F> {
    f: Option<F>,
}

impl<F> Work for FromFn<F>
where
    F: FnOnce() + Send + 'static,
{
    fn run(&mut self) {
        if let Some(f) = self.f.take() {
            f();
        }
    }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("FromFn")
            .field("consumed", &self.f.is_none())
            .finish()
    }
}
