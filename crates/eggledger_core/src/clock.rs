//! Time source seam for record timestamps and period aggregates.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

/// Source of "now" for creation timestamps and "today" for period sums.
///
/// `today` and `date_of` must read dates in the same calendar.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar date used to decide the current month.
    fn today(&self) -> NaiveDate {
        self.date_of(self.now())
    }

    /// Calendar date of `at` in this clock's calendar.
    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate;
}

/// Wall clock; dates follow the host's local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// Clock pinned to one instant, reading dates at a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            offset: Utc.fix(),
        }
    }

    /// Pins the clock to midday UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(noon.and_utc())
    }

    /// Reads calendar dates at `offset` instead of UTC.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock};
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    #[test]
    fn fixed_clock_reads_dates_at_its_offset() {
        let late_evening = Utc.with_ymd_and_hms(2026, 10, 31, 22, 30, 0).unwrap();
        let nairobi = FixedOffset::east_opt(3 * 3600).expect("valid offset");
        let clock = FixedClock::new(late_evening).with_offset(nairobi);

        let november_first = NaiveDate::from_ymd_opt(2026, 11, 1).expect("valid date");
        assert_eq!(clock.today(), november_first);
        assert_eq!(clock.date_of(clock.now()), november_first);
        assert_eq!(
            FixedClock::new(late_evening).today(),
            NaiveDate::from_ymd_opt(2026, 10, 31).expect("valid date")
        );
    }
}
