use crate::{
    data::{Error, Record},
    validate::parse_date,
};
use chrono::NaiveDate;

/// Inclusive range of calendar days. `start > end` is allowed and simply
/// matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parses both bounds; either one failing is `Error::InvalidRange`.
    pub fn parse(start: &str, end: &str) -> Result<Self, Error> {
        let bound = |input: &str| parse_date(input).map_err(|e| Error::InvalidRange(e.to_string()));
        Ok(Self {
            start: bound(start)?,
            end: bound(end)?,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Records whose date falls in `range`, in store order.
pub(crate) fn filter_by_date_range(records: &[Record], range: &DateRange) -> Vec<Record> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .copied()
        .collect()
}
