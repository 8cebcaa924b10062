use std::time::Instant;

/// Monotonic time source used to measure the time between updates.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Seconds elapsed from `since` to `now`, zero if `now` is earlier.
pub fn delta_time(since: Instant, now: Instant) -> f32 {
    now.saturating_duration_since(since).as_secs_f32()
}

#[cfg(test)]
pub mod testing {
    use std::{cell::Cell, rc::Rc, time::Duration};

    use super::*;

    /// Clock that only moves when told to. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock(Rc<Cell<Instant>>);

    impl ManualClock {
        pub fn new() -> Self {
            ManualClock(Rc::new(Cell::new(Instant::now())))
        }

        pub fn advance(&self, seconds: f32) {
            self.0.set(self.0.get() + Duration::from_secs_f32(seconds));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.0.get()
        }
    }
}
