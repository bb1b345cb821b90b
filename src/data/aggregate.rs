use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{month_label, year_from_flag, CountColumn, Rentals, Season};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Generic building blocks
// ---------------------------------------------------------------------------

/// One group produced by [`sum_by_key`]: the key and one sum per requested column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouped<K> {
    pub key: K,
    pub sums: Vec<u64>,
}

/// A [`Grouped`] row with a human-readable label attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labelled<K, L> {
    pub key: K,
    pub label: L,
    pub sums: Vec<u64>,
}

/// Long-form row: `(id, variable, value)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongRow<I> {
    pub id: I,
    pub variable: CountColumn,
    pub value: u64,
}

/// Group `rows` by `key` and sum each of `columns`.
///
/// Returns one entry per distinct key, ordered by key. `sums[i]` belongs to
/// `columns[i]`.
pub fn sum_by_key<R, K, F>(rows: &[R], key: F, columns: &[CountColumn]) -> Vec<Grouped<K>>
where
    R: Rentals,
    K: Ord,
    F: Fn(&R) -> K,
{
    let mut groups: BTreeMap<K, Vec<u64>> = BTreeMap::new();
    for row in rows {
        let sums = groups
            .entry(key(row))
            .or_insert_with(|| vec![0; columns.len()]);
        for (sum, column) in sums.iter_mut().zip(columns) {
            *sum += column.value(row);
        }
    }
    groups
        .into_iter()
        .map(|(key, sums)| Grouped { key, sums })
        .collect()
}

/// Attach a label to every group. A code outside the label function's domain
/// is a data-integrity error and aborts the whole mapping.
pub fn map_labels<K, L, F>(
    groups: Vec<Grouped<K>>,
    label: F,
) -> Result<Vec<Labelled<K, L>>, DashboardError>
where
    F: Fn(&K) -> Result<L, DashboardError>,
{
    groups
        .into_iter()
        .map(|g| {
            Ok(Labelled {
                label: label(&g.key)?,
                key: g.key,
                sums: g.sums,
            })
        })
        .collect()
}

/// Pivot wide rows into `(id, variable, value)` triples, row-major.
pub fn reshape_to_long<I: Clone>(rows: &[(I, Vec<u64>)], columns: &[CountColumn]) -> Vec<LongRow<I>> {
    rows.iter()
        .flat_map(|(id, values)| {
            columns.iter().zip(values).map(move |(&variable, &value)| LongRow {
                id: id.clone(),
                variable,
                value,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Dashboard aggregates
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub sum: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyAggregate {
    /// 1–12.
    pub month: u8,
    pub label: &'static str,
    pub casual: u64,
    pub registered: u64,
    pub cnt: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWeatherAggregate {
    pub season: Season,
    pub weather: u8,
    pub cnt: u64,
}

/// `(year, user type, total)` for the year-over-year chart.
pub type YearUserTotal = LongRow<i32>;

const USER_TYPES: [CountColumn; 2] = [CountColumn::Casual, CountColumn::Registered];
const ALL_COUNTS: [CountColumn; 3] = [CountColumn::Casual, CountColumn::Registered, CountColumn::Total];

/// Per-day sum of a single column.
pub fn daily_sums<R: Rentals>(rows: &[R], column: CountColumn) -> Vec<DailyAggregate> {
    sum_by_key(rows, |r| r.date(), &[column])
        .into_iter()
        .map(|g| DailyAggregate {
            date: g.key,
            sum: g.sums[0],
        })
        .collect()
}

/// Casual, registered and total rentals per month, Jan..Dec.
///
/// Months without rows are omitted.
pub fn monthly_totals<R: Rentals>(rows: &[R]) -> Result<Vec<MonthlyAggregate>, DashboardError> {
    let grouped = sum_by_key(rows, |r| r.month(), &ALL_COUNTS);
    let mut months: Vec<MonthlyAggregate> = map_labels(grouped, |m| month_label(*m))?
        .into_iter()
        .map(|l| MonthlyAggregate {
            month: l.key,
            label: l.label,
            casual: l.sums[0],
            registered: l.sums[1],
            cnt: l.sums[2],
        })
        .collect();
    months.sort_by_key(|m| m.month);
    Ok(months)
}

/// Total rentals per (season, weather situation), seasons in Spring..Winter order.
pub fn season_weather_totals<R: Rentals>(
    rows: &[R],
) -> Result<Vec<SeasonWeatherAggregate>, DashboardError> {
    let grouped = sum_by_key(rows, |r| (r.season(), r.weather()), &[CountColumn::Total]);
    Ok(map_labels(grouped, |(season, _)| Season::from_code(*season))?
        .into_iter()
        .map(|l| SeasonWeatherAggregate {
            season: l.label,
            weather: l.key.1,
            cnt: l.sums[0],
        })
        .collect())
}

/// Casual and registered totals per calendar year, in long form.
pub fn year_user_totals<R: Rentals>(rows: &[R]) -> Result<Vec<YearUserTotal>, DashboardError> {
    let grouped = sum_by_key(rows, |r| r.year_flag(), &USER_TYPES);
    let wide: Vec<(i32, Vec<u64>)> = map_labels(grouped, |flag| year_from_flag(*flag))?
        .into_iter()
        .map(|l| (l.label, l.sums))
        .collect();
    Ok(reshape_to_long(&wide, &USER_TYPES))
}
