use std::time::Duration;

use gtk4::glib;

/// One-shot delayed callbacks on the main loop. Cancelling a handle must
/// guarantee the callback never runs.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Self::Handle;

    /// Only called with handles whose callback has not run yet.
    fn cancel(&self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GlibScheduler;

impl Scheduler for GlibScheduler {
    type Handle = glib::SourceId;

    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> glib::SourceId {
        glib::timeout_add_local_once(delay, callback)
    }

    fn cancel(&self, handle: glib::SourceId) {
        handle.remove();
    }
}
