//! Deferred, coalescing refresh
//!
//! Changes to the shadow buffer are not sent right away. The first change
//! arms a one-shot timer; further changes before it fires ride along, so a
//! burst of placements costs a single flush of the rows it touched.
//!
//! The driver never owns a clock. It asks a [`RefreshTimer`] to arm and
//! cancel, and checks [`RefreshTimer::has_fired`] at its yield points
//! ([`Lcd::poll`](crate::display::Lcd::poll) and the end of every placement).
//! Hosts with a real timer callback can instead call
//! [`Lcd::refresh`](crate::display::Lcd::refresh) from it.
//!
//! ## Example
//!
//! ```
//! use hd44780_pcf8574::{ClockTimer, RefreshScheduler};
//!
//! let mut now = 0u64;
//! let mut scheduler = RefreshScheduler::new();
//! {
//!     let mut timer = ClockTimer::new(|| now);
//!     assert!(scheduler.schedule(&mut timer, 400));
//!     // Already armed: coalesced
//!     assert!(!scheduler.schedule(&mut timer, 400));
//!     assert!(!scheduler.take_due(&mut timer));
//! }
//! now = 400;
//! let mut timer = ClockTimer::new(|| now);
//! assert!(scheduler.take_due(&mut timer));
//! assert!(!scheduler.is_armed());
//! ```

/// One-shot timer used to defer flushes
pub trait RefreshTimer {
    /// Token identifying an armed timer
    type Handle;

    /// Arm a timer expiring `delay_ms` milliseconds from now
    fn arm(&mut self, delay_ms: u32) -> Self::Handle;

    /// Disarm a timer that has not been consumed yet
    fn cancel(&mut self, handle: Self::Handle);

    /// Whether the timer behind `handle` has expired
    fn has_fired(&mut self, handle: &Self::Handle) -> bool;
}

/// Timer that is always already expired
///
/// Every change is flushed at the end of the call that made it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateRefresh;

impl RefreshTimer for ImmediateRefresh {
    type Handle = ();

    fn arm(&mut self, _delay_ms: u32) -> Self::Handle {}

    fn cancel(&mut self, _handle: Self::Handle) {}

    fn has_fired(&mut self, _handle: &Self::Handle) -> bool {
        true
    }
}

/// Timer driven by a monotonic millisecond clock
///
/// Handles are deadlines; nothing needs undoing on cancel.
pub struct ClockTimer<F> {
    /// Current time in milliseconds
    now_ms: F,
}

impl<F> ClockTimer<F>
where
    F: FnMut() -> u64,
{
    /// Create a timer reading time from `now_ms`
    pub fn new(now_ms: F) -> Self {
        Self { now_ms }
    }
}

impl<F> RefreshTimer for ClockTimer<F>
where
    F: FnMut() -> u64,
{
    type Handle = u64;

    fn arm(&mut self, delay_ms: u32) -> Self::Handle {
        (self.now_ms)().saturating_add(u64::from(delay_ms))
    }

    fn cancel(&mut self, _handle: Self::Handle) {}

    fn has_fired(&mut self, handle: &Self::Handle) -> bool {
        (self.now_ms)() >= *handle
    }
}

/// Pending-flush bookkeeping
///
/// At most one timer is armed at a time.
#[derive(Debug)]
pub struct RefreshScheduler<H> {
    /// Handle of the armed timer
    pending: Option<H>,
}

impl<H> Default for RefreshScheduler<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H> RefreshScheduler<H> {
    /// Create an idle scheduler
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Whether a flush is pending
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Arm a flush unless one is already pending
    ///
    /// Returns whether a new timer was armed.
    pub fn schedule<T>(&mut self, timer: &mut T, delay_ms: u32) -> bool
    where
        T: RefreshTimer<Handle = H>,
    {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(timer.arm(delay_ms));
        true
    }

    /// Consume the pending timer if it has fired
    pub fn take_due<T>(&mut self, timer: &mut T) -> bool
    where
        T: RefreshTimer<Handle = H>,
    {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|handle| timer.has_fired(handle));
        if due {
            self.pending = None;
        }
        due
    }

    /// Drop the pending timer without cancelling it
    ///
    /// Used when the timer fired and is being serviced.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Cancel the pending timer, if any
    pub fn cancel<T>(&mut self, timer: &mut T)
    where
        T: RefreshTimer<Handle = H>,
    {
        if let Some(handle) = self.pending.take() {
            timer.cancel(handle);
        }
    }
}
