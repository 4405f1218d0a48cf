use chrono::{DateTime, NaiveDate, Utc};

use crate::utils::time::start_of_day;

/// Inclusive range of calendar days to summarise.
///
/// `from <= to` is not enforced; an inverted window simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl TimeWindow {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Window ending on `to`; a missing `from` collapses it to that single day
    pub fn ending_on(to: NaiveDate, from: Option<NaiveDate>) -> Self {
        Self {
            from: from.unwrap_or(to),
            to,
        }
    }

    /// Earliest instant that still counts
    pub fn lower_bound(&self) -> DateTime<Utc> {
        start_of_day(self.from)
    }

    pub fn is_after(&self, day: NaiveDate) -> bool {
        day > self.to
    }
}
