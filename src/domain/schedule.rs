/// Care intervals and calendar arithmetic
///
/// This module defines how often each kind of care is due and the
/// calendar-aware date math used to project "next due" dates. Month and year
/// steps follow the calendar (Jan 31 + 1 month lands on the last day of
/// February), not a fixed number of seconds.

use chrono::{DateTime, Datelike, Days, Months, Utc};

use crate::domain::CareType;

/// How long after the last care action the next one is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareInterval {
    Days(u32),
    Months(u32),
    Years(u32),
}

impl CareInterval {
    /// Add this interval to a date using calendar semantics
    ///
    /// Returns None only when the result would fall outside chrono's
    /// representable range.
    pub fn add_to(&self, date: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match *self {
            CareInterval::Days(days) => date.checked_add_days(Days::new(u64::from(days))),
            CareInterval::Months(months) => date.checked_add_months(Months::new(months)),
            CareInterval::Years(years) => {
                date.checked_add_months(Months::new(years.checked_mul(12)?))
            }
        }
    }
}

impl CareType {
    /// Fixed care interval for this care type
    pub fn interval(&self) -> CareInterval {
        match self {
            CareType::Watering => CareInterval::Days(7),
            CareType::Fertilizing => CareInterval::Months(1),
            CareType::Pruning => CareInterval::Months(3),
            CareType::Repotting => CareInterval::Years(1),
        }
    }
}

/// Project the next due date for a care type from its last occurrence
pub fn next_due(care_type: CareType, last: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    care_type.interval().add_to(last?)
}

/// Whether care of this type is due at `now`
///
/// Care that has never been performed is always due. Otherwise it is due once
/// the projected next date has been reached.
pub fn is_due(care_type: CareType, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(last) => match care_type.interval().add_to(last) {
            Some(due) => due <= now,
            // Unrepresentable due date: never reached
            None => false,
        },
    }
}

/// Whole days elapsed between two instants (0 if `to` is before `from`)
pub fn whole_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_days().max(0)
}

/// Whole calendar months elapsed between two instants (0 if `to` is before `from`)
pub fn whole_months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    if to <= from {
        return 0;
    }

    let months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    let mut months = months.max(0) as u32;

    // The month difference overshoots when the day/time of `to` has not yet
    // caught up with `from`
    while months > 0 {
        match from.checked_add_months(Months::new(months)) {
            Some(stepped) if stepped <= to => break,
            _ => months -= 1,
        }
    }

    months
}
