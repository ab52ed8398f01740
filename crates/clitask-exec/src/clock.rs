use time::OffsetDateTime;

/// Source of the timestamps stamped on start/finish messages.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

impl<K: Clock + ?Sized> Clock for &K {
    #[inline]
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}
