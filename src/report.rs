use crate::data::aggregate::{
    daily_sums, monthly_totals, season_weather_totals, year_user_totals, MonthlyAggregate,
    SeasonWeatherAggregate, YearUserTotal,
};
use crate::data::filter::filter_by_range;
use crate::data::model::{CountColumn, Dataset, DateRange};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Report – everything the UI draws for one date range
// ---------------------------------------------------------------------------

/// The three headline numbers, summed over the filtered daily table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub rentals: u64,
    pub registered: u64,
    pub casual: u64,
}

/// Chart tables for one date range. Rebuilt from the dataset on every range change.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub range: DateRange,
    pub metrics: Metrics,
    /// Monthly rentals over the whole dataset. Ignores `range`.
    pub monthly_trend: Vec<MonthlyAggregate>,
    /// Rentals per season and weather situation inside `range`.
    pub season_weather: Vec<SeasonWeatherAggregate>,
    /// Casual vs registered per month inside `range`.
    pub user_type_by_month: Vec<MonthlyAggregate>,
    /// Casual vs registered per year over the whole dataset. Ignores `range`.
    pub year_comparison: Vec<YearUserTotal>,
}

impl Report {
    pub fn build(dataset: &Dataset, range: DateRange) -> Result<Report, DashboardError> {
        let filtered = filter_by_range(&dataset.daily, range);

        let metrics = Metrics {
            rentals: filtered.iter().map(|r| r.cnt).sum(),
            registered: daily_sums(&filtered, CountColumn::Registered)
                .iter()
                .map(|d| d.sum)
                .sum(),
            casual: daily_sums(&filtered, CountColumn::Casual)
                .iter()
                .map(|d| d.sum)
                .sum(),
        };

        log::debug!(
            "Building report for {range}: {} of {} days selected",
            filtered.len(),
            dataset.daily.len()
        );

        Ok(Report {
            range,
            metrics,
            monthly_trend: monthly_totals(&dataset.daily)?,
            season_weather: season_weather_totals(&filtered)?,
            user_type_by_month: monthly_totals(&filtered)?,
            year_comparison: year_user_totals(&dataset.daily)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::DailyRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, year_flag: u8, month: u8, casual: u64, registered: u64) -> DailyRecord {
        DailyRecord {
            date,
            season: 1,
            year_flag,
            month,
            weather: 1,
            casual,
            registered,
            cnt: casual + registered,
        }
    }

    fn two_days() -> Dataset {
        Dataset {
            daily: vec![
                record(date(2011, 1, 1), 0, 1, 10, 20),
                record(date(2011, 1, 2), 0, 1, 5, 15),
            ],
            hourly: Vec::new(),
        }
    }

    #[test]
    fn single_day_metrics() {
        let d = date(2011, 1, 1);
        let report = Report::build(&two_days(), DateRange::new(d, d).unwrap()).unwrap();
        assert_eq!(
            report.metrics,
            Metrics {
                rentals: 30,
                registered: 20,
                casual: 10
            }
        );
    }

    #[test]
    fn monthly_trend_ignores_the_date_filter() {
        let d = date(2011, 1, 1);
        let report = Report::build(&two_days(), DateRange::new(d, d).unwrap()).unwrap();
        assert_eq!(report.monthly_trend.len(), 1);
        assert_eq!(report.monthly_trend[0].cnt, 50);
        assert_eq!(report.user_type_by_month[0].cnt, 30);
    }

    #[test]
    fn empty_range_gives_zero_metrics_and_empty_filtered_charts() {
        let range = DateRange::new(date(2012, 5, 1), date(2012, 5, 31)).unwrap();
        let report = Report::build(&two_days(), range).unwrap();

        assert_eq!(report.metrics, Metrics::default());
        assert!(report.season_weather.is_empty());
        assert!(report.user_type_by_month.is_empty());
        // Unfiltered charts still have data.
        assert!(!report.monthly_trend.is_empty());
        assert_eq!(report.year_comparison.len(), 2);
    }

    #[test]
    fn bad_season_code_fails_the_build() {
        let mut ds = two_days();
        ds.daily[1].season = 5;
        let range = ds.date_bounds().unwrap();
        assert!(matches!(
            Report::build(&ds, range),
            Err(DashboardError::Mapping { field: "season", .. })
        ));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let ds = two_days();
        let range = ds.date_bounds().unwrap();
        assert_eq!(
            Report::build(&ds, range).unwrap(),
            Report::build(&ds, range).unwrap()
        );
    }
}
