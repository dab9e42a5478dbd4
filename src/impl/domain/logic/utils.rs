use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Calendar month key `(year, month)`, month 1-based.
pub(crate) type MonthKey = (i32, u32);

pub(crate) fn month_key(date: DateTime<Utc>) -> MonthKey {
    (date.year(), date.month())
}

pub(crate) fn next_month((year, month): MonthKey) -> MonthKey {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// Every calendar month touched by `[start, end]`, in chronological order.
/// Empty when `start` is after `end`.
pub(crate) fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<MonthKey> {
    let mut months = Vec::new();
    if start > end {
        return months;
    }
    let last = (end.year(), end.month());
    let mut current = (start.year(), start.month());
    while current <= last {
        months.push(current);
        current = next_month(current);
    }
    months
}

/// The twelve months of `year`.
pub(crate) fn months_of_year(year: i32) -> Vec<MonthKey> {
    (1..=12).map(|month| (year, month)).collect()
}

/// Returns the first day of the month of the given date.
pub(crate) fn month_start_date(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .expect("copying a NaiveDate with overridden day=1 should never fail")
}

pub(crate) fn contains_inclusive(
    value: DateTime<Utc>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    from.map_or(true, |from| value >= from) && to.map_or(true, |to| value <= to)
}

/// Case-insensitive substring match. An empty needle matches everything.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}
