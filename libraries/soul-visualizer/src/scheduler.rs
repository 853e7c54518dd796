//! Display frame scheduling
//!
//! Mirrors `requestAnimationFrame`: a callback runs once, at the next display
//! frame, with a timestamp in milliseconds. A pending callback can be
//! cancelled until it runs.

use crate::error::Result;
use std::cell::RefCell;

/// Opaque id for a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i64);

/// One-shot frame callback, invoked with a timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Schedules callbacks on the display refresh
pub trait FrameScheduler {
    /// Run `callback` once at the next display frame
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle>;

    /// Drop a pending callback; unknown or already-run handles are ignored
    fn cancel_frame(&self, handle: FrameHandle);
}

#[derive(Default)]
struct QueueState {
    next_id: i64,
    pending: Vec<(FrameHandle, FrameCallback)>,
    requested: u64,
    cancelled: u64,
}

/// Frame scheduler driven by the caller
///
/// Nothing runs until [`QueueScheduler::run_frame`] is called. Callbacks that
/// request another frame while running are queued for the following call,
/// never the current one.
#[derive(Default)]
pub struct QueueScheduler {
    state: RefCell<QueueState>,
}

impl QueueScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback pending at the time of the call
    ///
    /// Returns the number of callbacks run.
    pub fn run_frame(&self, timestamp: f64) -> usize {
        let due = std::mem::take(&mut self.state.borrow_mut().pending);
        let count = due.len();
        for (_, callback) in due {
            callback(timestamp);
        }
        count
    }

    /// Callbacks waiting for the next frame
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Total callbacks ever requested
    pub fn requested_count(&self) -> u64 {
        self.state.borrow().requested
    }

    /// Total callbacks removed by `cancel_frame` before running
    pub fn cancelled_count(&self) -> u64 {
        self.state.borrow().cancelled
    }
}

impl FrameScheduler for QueueScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle> {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.requested += 1;
        let handle = FrameHandle(state.next_id);
        state.pending.push((handle, callback));
        Ok(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let mut state = self.state.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|(pending, _)| *pending != handle);
        if state.pending.len() < before {
            state.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn runs_callbacks_once_with_timestamp() {
        let scheduler = QueueScheduler::new();
        let seen = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&seen);
        scheduler
            .request_frame(Box::new(move |ts| sink.set(ts)))
            .unwrap();

        assert_eq!(scheduler.run_frame(16.0), 1);
        assert_eq!(seen.get(), 16.0);
        assert_eq!(scheduler.run_frame(32.0), 0);
        assert_eq!(seen.get(), 16.0);
    }

    #[test]
    fn cancelled_callback_never_runs() {
        let scheduler = QueueScheduler::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let handle = scheduler
            .request_frame(Box::new(move |_| flag.set(true)))
            .unwrap();

        scheduler.cancel_frame(handle);
        scheduler.cancel_frame(handle);

        assert_eq!(scheduler.run_frame(0.0), 0);
        assert!(!ran.get());
        assert_eq!(scheduler.cancelled_count(), 1);
    }

    #[test]
    fn rescheduling_from_a_callback_waits_for_next_frame() {
        let scheduler = Rc::new(QueueScheduler::new());
        let inner = Rc::clone(&scheduler);
        let count = Rc::new(Cell::new(0));
        let outer_count = Rc::clone(&count);

        scheduler
            .request_frame(Box::new(move |_| {
                outer_count.set(outer_count.get() + 1);
                let again = Rc::clone(&outer_count);
                inner
                    .request_frame(Box::new(move |_| again.set(again.get() + 1)))
                    .unwrap();
            }))
            .unwrap();

        assert_eq!(scheduler.run_frame(0.0), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(scheduler.run_frame(16.0), 1);
        assert_eq!(count.get(), 2);
        assert_eq!(scheduler.requested_count(), 2);
    }
}
