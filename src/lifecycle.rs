//! Mount lifecycle bookkeeping
//!
//! The browser layer delegates its ordering decisions here: which instance
//! is live, whether a mount that was waiting on the network is still wanted,
//! cleanup of a half-built view, and the restartable auto-advance interval.

use std::ops::Deref;

/// Something that can remove itself from the page
pub trait Teardown {
    /// Releases timers, listeners and elements owned by `self`
    fn teardown(&self);
}

/// Identifies one mount attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountTicket(u64);

/// Holds the live instance and the generation of the newest mount attempt
///
/// Every [`begin`](Self::begin) and [`clear`](Self::clear) bumps the
/// generation, so an attempt that resumes after a newer one started (or
/// after an unmount) is recognized as superseded.
#[derive(Debug)]
pub struct MountSlot<T> {
    generation: u64,
    active: Option<T>,
}

impl<T> MountSlot<T> {
    /// Empty slot
    pub const fn new() -> Self {
        Self {
            generation: 0,
            active: None,
        }
    }

    /// Whether an instance is live
    pub fn is_mounted(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `ticket` belongs to the newest mount attempt
    pub fn is_current(&self, ticket: MountTicket) -> bool {
        ticket.0 == self.generation
    }
}

impl<T> Default for MountSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Teardown> MountSlot<T> {
    /// Starts a mount attempt, tearing down the live instance
    pub fn begin(&mut self) -> MountTicket {
        self.clear();
        MountTicket(self.generation)
    }

    /// Stores `instance` if `ticket` is still current
    ///
    /// A superseded instance is torn down instead. Any instance already
    /// stored is torn down before being replaced. Returns whether `instance`
    /// became live.
    pub fn commit(&mut self, ticket: MountTicket, instance: T) -> bool {
        if !self.is_current(ticket) {
            instance.teardown();
            return false;
        }

        if let Some(previous) = self.active.replace(instance) {
            previous.teardown();
        }
        true
    }

    /// Tears down the live instance and cancels any pending attempt
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(active) = self.active.take() {
            active.teardown();
        }
    }
}

/// Removes the guarded view when dropped
///
/// Every early return between injecting the view and handing it to the live
/// instance leaves nothing behind on the page. The live instance holds its
/// view in the same guard, so the elements also go once it is released.
#[derive(Debug)]
pub struct ViewGuard<V: Teardown> {
    view: V,
}

impl<V: Teardown> ViewGuard<V> {
    /// Guards a freshly injected view
    pub fn new(view: V) -> Self {
        Self { view }
    }
}

impl<V: Teardown> Deref for ViewGuard<V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.view
    }
}

impl<V: Teardown> Drop for ViewGuard<V> {
    fn drop(&mut self) {
        self.view.teardown();
    }
}

/// Schedules and cancels a repeating callback
pub trait Scheduler {
    /// Handle identifying a scheduled callback
    type Handle;

    /// Schedules the callback every `interval_ms`; `None` if that failed
    fn schedule(&mut self, interval_ms: i32) -> Option<Self::Handle>;

    /// Cancels a scheduled callback
    fn cancel(&mut self, handle: Self::Handle);
}

/// Repeating timer that restarts from zero
///
/// `start` always cancels the running schedule first, so at most one is
/// ever pending and each start waits a full interval.
pub struct Interval<S: Scheduler> {
    scheduler: S,
    interval_ms: i32,
    handle: Option<S::Handle>,
}

impl<S: Scheduler> Interval<S> {
    /// Stopped interval
    pub fn new(scheduler: S, interval_ms: i32) -> Self {
        Self {
            scheduler,
            interval_ms,
            handle: None,
        }
    }

    /// Cancels any running schedule and starts a new one
    pub fn start(&mut self) {
        self.stop();
        self.handle = self.scheduler.schedule(self.interval_ms);
    }

    /// Cancels the running schedule, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Whether a schedule is pending
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// The underlying scheduler
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
