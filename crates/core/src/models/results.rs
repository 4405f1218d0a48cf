use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TimeWindow;

/// Number of qualifying matches played on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Summary returned for one window.
///
/// `breakdown` is kept most recent day first and `total` always equals the
/// sum of its counts; only [`MatchResults::record`] mutates either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResults {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total: u64,
    pub breakdown: Vec<DayCount>,
}

impl MatchResults {
    pub fn empty(window: &TimeWindow) -> Self {
        Self {
            from: window.from,
            to: window.to,
            total: 0,
            breakdown: Vec::new(),
        }
    }

    /// Count one match on `date`
    pub fn record(&mut self, date: NaiveDate) {
        // Upstream pages are newest first, so the bucket is usually the last one
        if let Some(last) = self.breakdown.last_mut().filter(|last| last.date == date) {
            last.count += 1;
        } else {
            match self
                .breakdown
                .binary_search_by(|probe| date.cmp(&probe.date))
            {
                Ok(idx) => self.breakdown[idx].count += 1,
                Err(idx) => self.breakdown.insert(idx, DayCount { date, count: 1 }),
            }
        }

        self.total += 1;
    }

    pub fn count_for(&self, date: NaiveDate) -> u64 {
        self.breakdown
            .iter()
            .find(|day| day.date == date)
            .map(|day| day.count)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
