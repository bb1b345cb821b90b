use super::model::{DateRange, Dated};

/// Return the rows whose date lies inside `range`, both ends inclusive.
///
/// An empty result is not an error: the charts simply render without data.
pub fn filter_by_range<R: Dated + Clone>(rows: &[R], range: DateRange) -> Vec<R> {
    rows.iter()
        .filter(|row| range.contains(row.date()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};

    use super::*;
    use crate::data::model::{DailyRecord, HourlyRecord};

    fn day(date: NaiveDate) -> DailyRecord {
        DailyRecord {
            date,
            season: 1,
            year_flag: 0,
            month: 1,
            weather: 1,
            casual: 1,
            registered: 2,
            cnt: 3,
        }
    }

    fn january() -> Vec<DailyRecord> {
        let first = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        (0..31).map(|i| day(first + Duration::days(i))).collect()
    }

    #[test]
    fn keeps_only_rows_inside_the_range_inclusive() {
        let rows = january();
        let start = NaiveDate::from_ymd_opt(2011, 1, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2011, 1, 20).unwrap();
        let range = DateRange::new(start, end).unwrap();

        let kept = filter_by_range(&rows, range);
        assert_eq!(kept.len(), 11);
        assert!(kept.iter().all(|r| r.date >= start && r.date <= end));
        assert_eq!(kept.first().map(|r| r.date), Some(start));
        assert_eq!(kept.last().map(|r| r.date), Some(end));
    }

    #[test]
    fn single_day_range() {
        let rows = january();
        let d = NaiveDate::from_ymd_opt(2011, 1, 31).unwrap();
        let kept = filter_by_range(&rows, DateRange::new(d, d).unwrap());
        assert_eq!(kept, vec![day(d)]);
    }

    #[test]
    fn range_without_rows_is_empty() {
        let rows = january();
        let start = NaiveDate::from_ymd_opt(2012, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2012, 6, 30).unwrap();
        assert!(filter_by_range(&rows, DateRange::new(start, end).unwrap()).is_empty());
    }

    #[test]
    fn works_on_hourly_rows() {
        let d = NaiveDate::from_ymd_opt(2011, 1, 2).unwrap();
        let rows: Vec<HourlyRecord> = january()
            .into_iter()
            .flat_map(|day| (0..24).map(move |hour| HourlyRecord { day, hour }))
            .collect();

        let kept = filter_by_range(&rows, DateRange::new(d, d).unwrap());
        assert_eq!(kept.len(), 24);
    }
}
