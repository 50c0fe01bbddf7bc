pub mod history;
pub mod insider;
pub mod news;
pub mod quotes;

use chrono::NaiveDate;

/// Calendar date the fixtures treat as "today".
///
/// Histories ending on this date look like an open session to a clock set to
/// the same day; histories ending the day before look closed.
pub const FIXTURE_TODAY: (i32, u32, u32) = (2024, 3, 6);

pub fn today() -> NaiveDate {
    let (y, m, d) = FIXTURE_TODAY;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
