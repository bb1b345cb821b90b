use std::sync::Arc;

use chrono::NaiveDate;

use crate::data::model::{Dataset, DateRange};
use crate::error::DashboardError;
use crate::report::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded tables. Never mutated.
    pub dataset: Dataset,

    /// Span of the daily table; the date pickers are clamped to it.
    pub bounds: DateRange,

    /// Report for the current range (rebuilt on every range change).
    pub report: Report,

    /// Sidebar image bytes, if the download succeeded.
    pub sidebar_image: Option<Arc<[u8]>>,

    /// Shown in place of the image when the download failed.
    pub image_warning: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the initial state over the full date span.
    ///
    /// Fails on an empty daily table or on a coded value outside its domain;
    /// both abort startup. A failed image download only produces a warning.
    pub fn new(
        dataset: Dataset,
        sidebar_image: Result<Arc<[u8]>, DashboardError>,
    ) -> Result<Self, DashboardError> {
        let bounds = dataset
            .date_bounds()
            .ok_or_else(|| DashboardError::Empty("daily table".into()))?;
        let report = Report::build(&dataset, bounds)?;

        let (sidebar_image, image_warning) = match sidebar_image {
            Ok(bytes) => (Some(bytes), None),
            Err(e) => {
                log::warn!("Sidebar image unavailable: {e:#}");
                (None, Some(format!("Image unavailable: {e}")))
            }
        };

        Ok(Self {
            dataset,
            bounds,
            report,
            sidebar_image,
            image_warning,
            status_message: None,
        })
    }

    pub fn range(&self) -> DateRange {
        self.report.range
    }

    /// Move the start of the range. The end follows if it would end up before the start.
    pub fn set_start(&mut self, start: NaiveDate) {
        let start = self.clamp(start);
        let end = self.range().end().max(start);
        self.set_range(start, end);
    }

    /// Move the end of the range. The start follows if it would end up after the end.
    pub fn set_end(&mut self, end: NaiveDate) {
        let end = self.clamp(end);
        let start = self.range().start().min(end);
        self.set_range(start, end);
    }

    /// Back to the full span of the data.
    pub fn reset_range(&mut self) {
        self.set_range(self.bounds.start(), self.bounds.end());
    }

    fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.bounds.start(), self.bounds.end())
    }

    fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        match DateRange::new(start, end) {
            Ok(range) if range != self.range() => self.rerender(range),
            Ok(_) => {}
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
    }

    /// Recompute every aggregate for `range`.
    pub fn rerender(&mut self, range: DateRange) {
        match Report::build(&self.dataset, range) {
            Ok(report) => {
                self.report = report;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to rebuild report for {range}: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DailyRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, casual: u64, registered: u64) -> DailyRecord {
        DailyRecord {
            date,
            season: 1,
            year_flag: 0,
            month: 1,
            weather: 1,
            casual,
            registered,
            cnt: casual + registered,
        }
    }

    fn state() -> AppState {
        let dataset = Dataset {
            daily: vec![
                record(date(2011, 1, 1), 10, 20),
                record(date(2011, 1, 2), 5, 15),
                record(date(2011, 1, 3), 1, 1),
            ],
            hourly: Vec::new(),
        };
        AppState::new(dataset, Err(DashboardError::EmptyImage("http://x".into()))).unwrap()
    }

    #[test]
    fn starts_on_full_range_with_image_warning() {
        let s = state();
        assert_eq!(s.range(), s.bounds);
        assert_eq!(s.report.metrics.rentals, 52);
        assert!(s.sidebar_image.is_none());
        assert!(s.image_warning.is_some());
    }

    #[test]
    fn narrowing_the_range_recomputes_metrics() {
        let mut s = state();
        s.set_end(date(2011, 1, 1));
        assert_eq!(s.range().start(), date(2011, 1, 1));
        assert_eq!(s.report.metrics.rentals, 30);
        assert_eq!(s.report.metrics.registered, 20);
        assert_eq!(s.report.metrics.casual, 10);

        s.reset_range();
        assert_eq!(s.report.metrics.rentals, 52);
    }

    #[test]
    fn start_after_end_drags_the_end_along() {
        let mut s = state();
        s.set_end(date(2011, 1, 1));
        s.set_start(date(2011, 1, 3));
        assert_eq!(s.range().start(), date(2011, 1, 3));
        assert_eq!(s.range().end(), date(2011, 1, 3));
    }

    #[test]
    fn picks_outside_the_data_are_clamped() {
        let mut s = state();
        s.set_start(date(2010, 6, 1));
        s.set_end(date(2013, 1, 1));
        assert_eq!(s.range(), s.bounds);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let dataset = Dataset {
            daily: Vec::new(),
            hourly: Vec::new(),
        };
        assert!(AppState::new(dataset, Ok(Arc::from(&b"png"[..]))).is_err());
    }
}
