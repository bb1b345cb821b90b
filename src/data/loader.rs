use std::path::Path;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::model::{DailyRecord, Dataset, HourlyRecord};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the daily and hourly tables.
///
/// Both files are UTF-8 CSV with a header row in the public bike-sharing schema
/// (`dteday, season, yr, mnth, weathersit, casual, registered, cnt`, plus `hr`
/// for the hourly file). Extra columns such as `instant` or `temp` are ignored.
pub fn load_dataset(daily_path: &Path, hourly_path: &Path) -> Result<Dataset, DashboardError> {
    let daily = load_daily(daily_path)?;
    if daily.is_empty() {
        return Err(DashboardError::Empty(daily_path.to_path_buf()));
    }
    let hourly = load_hourly(hourly_path)?;

    log::info!(
        "Loaded {} daily rows from {} and {} hourly rows from {}",
        daily.len(),
        daily_path.display(),
        hourly.len(),
        hourly_path.display()
    );

    Ok(Dataset { daily, hourly })
}

pub fn load_daily(path: &Path) -> Result<Vec<DailyRecord>, DashboardError> {
    read_rows::<RawDaily>(path)?
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(path, i + 1))
        .collect()
}

pub fn load_hourly(path: &Path) -> Result<Vec<HourlyRecord>, DashboardError> {
    read_rows::<RawHourly>(path)?
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let hour = raw.hr;
            let day = raw.into_daily().into_record(path, i + 1)?;
            Ok(HourlyRecord { day, hour })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV schema
// ---------------------------------------------------------------------------

/// Direct mapping of the shared CSV columns. The date stays text until
/// [`RawDaily::into_record`] so a bad date is reported as such.
#[derive(Debug, Deserialize)]
struct RawDaily {
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u8,
    weathersit: u8,
    casual: u64,
    registered: u64,
    cnt: u64,
}

#[derive(Debug, Deserialize)]
struct RawHourly {
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u8,
    hr: u8,
    weathersit: u8,
    casual: u64,
    registered: u64,
    cnt: u64,
}

impl RawHourly {
    fn into_daily(self) -> RawDaily {
        RawDaily {
            dteday: self.dteday,
            season: self.season,
            yr: self.yr,
            mnth: self.mnth,
            weathersit: self.weathersit,
            casual: self.casual,
            registered: self.registered,
            cnt: self.cnt,
        }
    }
}

impl RawDaily {
    fn into_record(self, path: &Path, row: usize) -> Result<DailyRecord, DashboardError> {
        let date = parse_date(&self.dteday).map_err(|source| DashboardError::Parse {
            path: path.to_path_buf(),
            row,
            value: self.dteday.clone(),
            source,
        })?;

        Ok(DailyRecord {
            date,
            season: self.season,
            year_flag: self.yr,
            month: self.mnth,
            weather: self.weathersit,
            casual: self.casual,
            registered: self.registered,
            cnt: self.cnt,
        })
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DashboardError::Open(path.to_path_buf(), e))?;

    reader
        .deserialize::<T>()
        .enumerate()
        .map(|(i, result)| {
            result.map_err(|source| DashboardError::Load {
                path: path.to_path_buf(),
                row: i + 1,
                source,
            })
        })
        .collect()
}

/// Accepts `YYYY-MM-DD` or `YYYY/MM/DD`, with an optional trailing time part
/// (`2011-01-01 00:00:00`, `2011-01-01T00:00:00`) that is dropped.
fn parse_date(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    let day_part = text
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(text);

    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .or_else(|e| NaiveDate::parse_from_str(day_part, "%Y/%m/%d").map_err(|_| e))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const DAY_HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weathersit,casual,registered,cnt";
    const HOUR_HEADER: &str =
        "instant,dteday,season,yr,mnth,hr,holiday,weathersit,casual,registered,cnt";

    fn write_csv(dir: &tempfile::TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        path
    }

    #[test]
    fn loads_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let day = write_csv(
            &dir,
            "day.csv",
            &[
                DAY_HEADER,
                "1,2011-01-01,1,0,1,0,2,331,654,985",
                "2,2011-01-02,1,0,1,0,2,131,670,801",
            ],
        );
        let hour = write_csv(
            &dir,
            "hour.csv",
            &[HOUR_HEADER, "1,2011-01-01,1,0,1,0,0,1,3,13,16"],
        );

        let ds = load_dataset(&day, &hour).unwrap();
        assert_eq!(ds.daily.len(), 2);
        assert_eq!(ds.daily[0].date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(ds.daily[0].weather, 2);
        assert_eq!(ds.daily[1].cnt, 801);
        assert_eq!(ds.hourly.len(), 1);
        assert_eq!(ds.hourly[0].hour, 0);
        assert_eq!(ds.hourly[0].day.registered, 13);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_daily(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Open(..)));
        assert!(err.is_fatal());
    }

    #[test]
    fn unparseable_date_names_the_row_and_value() {
        let dir = tempfile::tempdir().unwrap();
        let day = write_csv(
            &dir,
            "day.csv",
            &[
                DAY_HEADER,
                "1,2011-01-01,1,0,1,0,2,331,654,985",
                "2,yesterday,1,0,1,0,2,131,670,801",
            ],
        );

        match load_daily(&day).unwrap_err() {
            DashboardError::Parse { row, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_count_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let day = write_csv(
            &dir,
            "day.csv",
            &[DAY_HEADER, "1,2011-01-01,1,0,1,0,2,many,654,985"],
        );
        assert!(matches!(
            load_daily(&day).unwrap_err(),
            DashboardError::Load { row: 1, .. }
        ));
    }

    #[test]
    fn empty_daily_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let day = write_csv(&dir, "day.csv", &[DAY_HEADER]);
        let hour = write_csv(&dir, "hour.csv", &[HOUR_HEADER]);
        assert!(matches!(
            load_dataset(&day, &hour).unwrap_err(),
            DashboardError::Empty(_)
        ));
    }

    #[test]
    fn date_formats() {
        let expected = NaiveDate::from_ymd_opt(2012, 12, 31).unwrap();
        assert_eq!(parse_date("2012-12-31").unwrap(), expected);
        assert_eq!(parse_date("2012/12/31").unwrap(), expected);
        assert_eq!(parse_date("2012-12-31 00:00:00").unwrap(), expected);
        assert_eq!(parse_date("2012-12-31T08:00:00").unwrap(), expected);
        assert!(parse_date("31.12.2012").is_err());
    }
}
