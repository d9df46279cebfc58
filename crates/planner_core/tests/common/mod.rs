#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use planner_core::{MemoryBackend, PersistenceAdapter, TaskStore};

/// Clock frozen at one local instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Local>,
}

impl FixedClock {
    pub fn at(now: DateTime<Local>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now.with_timezone(&Utc)
    }
}

pub fn local(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, hour, 0, 0)
        .unwrap()
}

/// Noon on 2024-05-01, local time.
pub fn noon_clock() -> FixedClock {
    FixedClock::at(local(2024, 5, 1, 12))
}

pub fn memory_store(backend: &MemoryBackend) -> TaskStore<FixedClock> {
    TaskStore::with_clock(PersistenceAdapter::new(backend.clone()), noon_clock())
}
