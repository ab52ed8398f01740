use std::fmt;

use time::{Duration, OffsetDateTime};

/// Wall time spent by a task.
///
/// Never negative: if the clock moved backwards between the two instants the span is zero.
/// Displays as `[d.]hh:mm:ss[.fffffff]`, with the day part only when non-zero and
/// seven fractional digits (100ns ticks) only when the sub-second part is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Elapsed(Duration);

impl Elapsed {
    pub fn between(start: OffsetDateTime, finish: OffsetDateTime) -> Self {
        Self::from_duration(finish - start)
    }

    pub fn from_duration(d: Duration) -> Self {
        Self(d.max(Duration::ZERO))
    }

    #[inline]
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    #[inline]
    pub fn whole_milliseconds(&self) -> u64 {
        u64::try_from(self.0.whole_milliseconds()).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.0;
        let days = d.whole_days();
        let hours = d.whole_hours() % 24;
        let minutes = d.whole_minutes() % 60;
        let seconds = d.whole_seconds() % 60;
        let ticks = d.subsec_nanoseconds() / 100;

        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")?;
        if ticks > 0 {
            write!(f, ".{ticks:07}")?;
        }
        Ok(())
    }
}
