use chrono::{NaiveDateTime, TimeDelta};
use std::sync::{Arc, RwLock};

use crate::domain::clock::clock::{Clock, SharedClock};

/// Manually driven clock. Clones share the same instant, so a test can keep one handle and hand
/// the other to the engine.
#[derive(Debug, Clone)]
pub struct MockClock {
    pub time: Arc<RwLock<NaiveDateTime>>,
}

impl MockClock {
    pub fn new(time: NaiveDateTime) -> MockClock {
        MockClock { time: Arc::new(RwLock::new(time)) }
    }

    pub fn set(&self, time: NaiveDateTime) {
        *self.time.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = time;
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.time.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard += delta;
    }

    pub fn shared(&self) -> SharedClock {
        SharedClock(Arc::new(self.clone()))
    }
}

impl Clock for MockClock {
    fn now(&self) -> NaiveDateTime {
        *self.time.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn clone_box(&self) -> SharedClock {
        self.shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn clones_share_the_same_instant() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 29).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let clock = MockClock::new(start);
        let shared = clock.shared();

        clock.advance(TimeDelta::seconds(90));

        assert_eq!(shared.now(), start + TimeDelta::seconds(90));
    }
}
