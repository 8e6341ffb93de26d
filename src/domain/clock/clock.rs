use chrono::{Local, NaiveDateTime, TimeDelta};
use std::sync::{Arc, Mutex};

/// Source of the current instant for every time-dependent view the engine derives.
///
/// All instants are naive local wall-clock times: the lounge runs in a single time zone and the
/// stored session fields (`date`, `entryTime`, `outTime`) carry no offset.
pub trait Clock: std::fmt::Debug + Send + Sync {
    fn now(&self) -> NaiveDateTime;
    fn clone_box(&self) -> SharedClock;
}

#[derive(Debug)]
pub struct SharedClock(pub Arc<dyn Clock>);

impl SharedClock {
    pub fn new(clock: impl Clock + 'static) -> Self {
        SharedClock(Arc::new(clock))
    }
}

impl Clone for SharedClock {
    fn clone(&self) -> Self {
        self.0.clone_box()
    }
}

impl std::ops::Deref for SharedClock {
    type Target = dyn Clock;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

#[derive(Debug)]
struct ClockState {
    is_shifted: bool,
    shifted_base: NaiveDateTime,
    real_time_base: NaiveDateTime,
}

/// Wall clock of the host machine. A shifted clock starts at a chosen instant and then advances
/// in real time, which lets an operator replay a past evening against a stored snapshot.
#[derive(Debug, Clone)]
pub struct SystemClock {
    state: Arc<Mutex<ClockState>>,
}

impl SystemClock {
    pub fn new() -> SystemClock {
        let real_now = Self::local_now();
        let state = ClockState { is_shifted: false, shifted_base: real_now, real_time_base: real_now };

        SystemClock { state: Arc::new(Mutex::new(state)) }
    }

    pub fn starting_at(base: NaiveDateTime) -> SystemClock {
        let state = ClockState { is_shifted: true, shifted_base: base, real_time_base: Self::local_now() };

        SystemClock { state: Arc::new(Mutex::new(state)) }
    }

    fn local_now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn elapsed_since(base: NaiveDateTime) -> TimeDelta {
        Self::local_now() - base
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if state.is_shifted {
            state.shifted_base + Self::elapsed_since(state.real_time_base)
        } else {
            Self::local_now()
        }
    }

    fn clone_box(&self) -> SharedClock {
        SharedClock(Arc::new(self.clone()))
    }
}

impl From<SharedClock> for Arc<dyn Clock> {
    fn from(wrapper: SharedClock) -> Self {
        wrapper.0
    }
}
