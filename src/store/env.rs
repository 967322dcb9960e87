//! Injectable runtime dependencies of the store: the identifier source and
//! the clock. Production code uses [`UuidSource`] and [`SystemClock`]; tests
//! swap in the deterministic doubles from [`fixtures`] so ids and timestamps
//! are reproducible.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Produces fresh, collision-free item ids.
pub trait IdSource {
    fn next_id(&mut self) -> Uuid;
}

/// Supplies the current time for `created_at`/`modified_at` stamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use std::cell::Cell;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::{Clock, IdSource};

    /// Hands out `Uuid::from_u128(1)`, `from_u128(2)`, ... in order.
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        next: u128,
    }

    impl SequentialIds {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl IdSource for SequentialIds {
        fn next_id(&mut self) -> Uuid {
            self.next += 1;
            Uuid::from_u128(self.next)
        }
    }

    /// Advances by a fixed step on every read, so successive mutations get
    /// strictly increasing timestamps.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Cell<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        pub fn new() -> Self {
            Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        }

        pub fn starting_at(start: DateTime<Utc>) -> Self {
            Self {
                next: Cell::new(start),
                step: Duration::seconds(1),
            }
        }
    }

    impl Default for SteppingClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let current = self.next.get();
            self.next.set(current + self.step);
            current
        }
    }

}
