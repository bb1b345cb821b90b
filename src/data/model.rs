use std::fmt;

use chrono::NaiveDate;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Record traits – what the aggregator needs to know about a row
// ---------------------------------------------------------------------------

/// A row that belongs to a calendar day.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// A row carrying the three rental counters plus its coded attributes.
pub trait Rentals: Dated {
    fn casual(&self) -> u64;
    fn registered(&self) -> u64;
    fn cnt(&self) -> u64;
    fn season(&self) -> u8;
    fn weather(&self) -> u8;
    fn month(&self) -> u8;
    fn year_flag(&self) -> u8;
}

// ---------------------------------------------------------------------------
// DailyRecord / HourlyRecord – one row of day.csv / hour.csv
// ---------------------------------------------------------------------------

/// One calendar day of rentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// 1–4, see [`Season`].
    pub season: u8,
    /// 0 = 2011, 1 = 2012.
    pub year_flag: u8,
    /// 1–12.
    pub month: u8,
    /// Weather situation code (1 = clear … 4 = heavy rain).
    pub weather: u8,
    pub casual: u64,
    pub registered: u64,
    /// Total rentals, `casual + registered`.
    pub cnt: u64,
}

/// One hour of rentals. Same columns as [`DailyRecord`] plus the hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRecord {
    pub day: DailyRecord,
    /// 0–23.
    pub hour: u8,
}

impl Dated for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Rentals for DailyRecord {
    fn casual(&self) -> u64 {
        self.casual
    }
    fn registered(&self) -> u64 {
        self.registered
    }
    fn cnt(&self) -> u64 {
        self.cnt
    }
    fn season(&self) -> u8 {
        self.season
    }
    fn weather(&self) -> u8 {
        self.weather
    }
    fn month(&self) -> u8 {
        self.month
    }
    fn year_flag(&self) -> u8 {
        self.year_flag
    }
}

impl Dated for HourlyRecord {
    fn date(&self) -> NaiveDate {
        self.day.date
    }
}

impl Rentals for HourlyRecord {
    fn casual(&self) -> u64 {
        self.day.casual
    }
    fn registered(&self) -> u64 {
        self.day.registered
    }
    fn cnt(&self) -> u64 {
        self.day.cnt
    }
    fn season(&self) -> u8 {
        self.day.season
    }
    fn weather(&self) -> u8 {
        self.day.weather
    }
    fn month(&self) -> u8 {
        self.day.month
    }
    fn year_flag(&self) -> u8 {
        self.day.year_flag
    }
}

// ---------------------------------------------------------------------------
// CountColumn – the summable columns
// ---------------------------------------------------------------------------

/// Numeric column that can be summed by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CountColumn {
    Casual,
    Registered,
    Total,
}

impl CountColumn {
    pub fn value<R: Rentals>(self, row: &R) -> u64 {
        match self {
            CountColumn::Casual => row.casual(),
            CountColumn::Registered => row.registered(),
            CountColumn::Total => row.cnt(),
        }
    }

    /// Column name as it appears in the CSV header and in long-form tables.
    pub fn name(self) -> &'static str {
        match self {
            CountColumn::Casual => "casual",
            CountColumn::Registered => "registered",
            CountColumn::Total => "cnt",
        }
    }
}

impl fmt::Display for CountColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Coded domains: season, month, year flag, weather
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn from_code(code: u8) -> Result<Season, DashboardError> {
        match code {
            1 => Ok(Season::Spring),
            2 => Ok(Season::Summer),
            3 => Ok(Season::Fall),
            4 => Ok(Season::Winter),
            other => Err(DashboardError::Mapping {
                field: "season",
                code: other.into(),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar order of the month axis.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Month number (1–12) → three-letter abbreviation.
pub fn month_label(month: u8) -> Result<&'static str, DashboardError> {
    usize::from(month)
        .checked_sub(1)
        .and_then(|i| MONTH_LABELS.get(i).copied())
        .ok_or(DashboardError::Mapping {
            field: "month",
            code: month.into(),
        })
}

/// Year flag (0/1) → calendar year.
pub fn year_from_flag(flag: u8) -> Result<i32, DashboardError> {
    match flag {
        0 => Ok(2011),
        1 => Ok(2012),
        other => Err(DashboardError::Mapping {
            field: "year",
            code: other.into(),
        }),
    }
}

/// Legend text for a weather situation code. Unknown codes fall back to the number.
pub fn weather_label(code: u8) -> String {
    let text = match code {
        1 => "Clear",
        2 => "Mist",
        3 => "Light rain/snow",
        4 => "Heavy rain",
        other => return format!("Weather {other}"),
    };
    format!("{code} {text}")
}

// ---------------------------------------------------------------------------
// DateRange – closed interval picked in the sidebar
// ---------------------------------------------------------------------------

/// Closed date interval `[start, end]`, always with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Dataset – both loaded tables
// ---------------------------------------------------------------------------

/// The two loaded tables. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub daily: Vec<DailyRecord>,
    pub hourly: Vec<HourlyRecord>,
}

impl Dataset {
    /// Full span of the daily table, or `None` when it is empty.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let min = self.daily.iter().map(|r| r.date).min()?;
        let max = self.daily.iter().map(|r| r.date).max()?;
        Some(DateRange { start: min, end: max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn season_codes_round_trip_and_reject_unknown() {
        let labels: Vec<&str> = (1..=4)
            .map(|c| Season::from_code(c).unwrap().label())
            .collect();
        assert_eq!(labels, ["Spring", "Summer", "Fall", "Winter"]);
        let decoded: Vec<Season> = (1..=4).map(|c| Season::from_code(c).unwrap()).collect();
        assert_eq!(decoded, Season::ALL);
        assert!(matches!(
            Season::from_code(0),
            Err(DashboardError::Mapping { field: "season", code: 0 })
        ));
        assert!(Season::from_code(5).is_err());
    }

    #[test]
    fn month_labels_cover_the_calendar() {
        let labels: Vec<&str> = (1..=12).map(|m| month_label(m).unwrap()).collect();
        assert_eq!(labels, MONTH_LABELS);
        assert!(month_label(0).is_err());
        assert!(month_label(13).is_err());
    }

    #[test]
    fn year_flags_map_to_2011_and_2012() {
        assert_eq!(year_from_flag(0).unwrap(), 2011);
        assert_eq!(year_from_flag(1).unwrap(), 2012);
        assert!(matches!(
            year_from_flag(2),
            Err(DashboardError::Mapping { field: "year", code: 2 })
        ));
    }

    #[test]
    fn unknown_weather_code_still_gets_a_label() {
        assert_eq!(weather_label(1), "1 Clear");
        assert_eq!(weather_label(9), "Weather 9");
    }

    #[test]
    fn date_range_rejects_reversed_bounds() {
        assert!(DateRange::new(date(2011, 1, 2), date(2011, 1, 1)).is_err());

        let range = DateRange::new(date(2011, 1, 1), date(2011, 1, 1)).unwrap();
        assert!(range.contains(date(2011, 1, 1)));
        assert!(!range.contains(date(2011, 1, 2)));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset {
            daily: Vec::new(),
            hourly: Vec::new(),
        };
        assert!(ds.date_bounds().is_none());
    }
}
