//! Aggregations behind the statistics endpoints.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::data::models::DayCount;

pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Groups timestamps by calendar day, oldest day first.
pub fn count_by_day<I>(stamps: I) -> Vec<DayCount>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for stamp in stamps {
        *per_day.entry(stamp.date()).or_default() += 1;
    }
    per_day
        .into_iter()
        .map(|(day, count)| DayCount {
            date: day.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

/// `H:MM` between the earliest and latest timestamp, `None` when empty.
pub fn time_spent(stamps: &[NaiveDateTime]) -> Option<String> {
    let first = stamps.iter().min()?;
    let last = stamps.iter().max()?;
    let total_minutes = (*last - *first).num_minutes();
    Some(format!("{}:{:02}", total_minutes / 60, total_minutes % 60))
}
