//! Timestamp sequencing policies.
//!
//! Two policies exist and they intentionally disagree for the same input:
//!
//! - [`FixedIntervalTicks`] steps from the window start and stops once the
//!   next step would pass the window end (single-source mode).
//! - [`EvenTicks`] derives a packet count by dividing the window length by
//!   the interval, and always emits at least one instant (multi-source mode).

use crate::timestamp::{end_of_day, start_of_day};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use telemetry_core::ValidationError;

/// Packet frequency in whole minutes, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Frequency(u32);

impl Frequency {
    /// Validate a frequency entered by the operator.
    pub fn from_minutes(minutes: i64) -> Result<Self, ValidationError> {
        if minutes <= 0 {
            return Err(ValidationError::NonPositiveFrequency(minutes));
        }
        u32::try_from(minutes)
            .map(Frequency)
            .map_err(|_| ValidationError::FrequencyTooLarge {
                value: minutes,
                max: i64::from(u32::MAX),
            })
    }

    pub fn minutes(&self) -> u32 {
        self.0
    }

    pub fn seconds(&self) -> i64 {
        i64::from(self.0) * 60
    }
}

/// Generation window from midnight of the start date to 23:59:00 of the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    /// Window covering whole days; the date order is not checked here.
    pub fn days(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start: start_of_day(start_date),
            end: end_of_day(end_date),
        }
    }

    /// Window covering whole days, rejecting an end before the start.
    pub fn checked_days(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ValidationError> {
        if end_date < start_date {
            return Err(ValidationError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self::days(start_date, end_date))
    }

    /// Length of the window in seconds.
    pub fn total_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    /// Step-until-exceeded ticks, inclusive of the window end.
    pub fn fixed_interval(&self, frequency: Frequency) -> FixedIntervalTicks {
        FixedIntervalTicks {
            next: self.start,
            end: self.end,
            step: Duration::seconds(frequency.seconds()),
        }
    }

    /// Count-based ticks spaced one interval apart.
    pub fn even_distribution(&self, frequency: Frequency) -> EvenTicks {
        let interval_secs = frequency.seconds();
        let total = self.total_seconds();
        let count = if total < interval_secs {
            1
        } else {
            (total / interval_secs) as u64
        };
        EvenTicks {
            start: self.start,
            interval_secs,
            index: 0,
            count,
        }
    }
}

/// Iterator stepping by a fixed interval until the window end is passed.
#[derive(Debug, Clone)]
pub struct FixedIntervalTicks {
    next: NaiveDateTime,
    end: NaiveDateTime,
    step: Duration,
}

impl Iterator for FixedIntervalTicks {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let current = self.next;
        self.next = current + self.step;
        Some(current)
    }
}

/// Iterator over `count` instants at `start + i * interval`.
#[derive(Debug, Clone)]
pub struct EvenTicks {
    start: NaiveDateTime,
    interval_secs: i64,
    index: u64,
    count: u64,
}

impl Iterator for EvenTicks {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let offset = self.index as i64 * self.interval_secs;
        self.index += 1;
        Some(self.start + Duration::seconds(offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EvenTicks {}
