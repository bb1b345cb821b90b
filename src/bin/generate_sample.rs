use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One row of day.csv (hour.csv adds `hr` after `mnth`).
#[derive(Debug, Serialize)]
struct DayRow {
    instant: usize,
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u8,
    holiday: u8,
    weekday: u8,
    workingday: u8,
    weathersit: u8,
    casual: u64,
    registered: u64,
    cnt: u64,
}

#[derive(Debug, Serialize)]
struct HourRow {
    instant: usize,
    dteday: String,
    season: u8,
    yr: u8,
    mnth: u8,
    hr: u8,
    holiday: u8,
    weekday: u8,
    workingday: u8,
    weathersit: u8,
    casual: u64,
    registered: u64,
    cnt: u64,
}

/// Astronomical seasons as used by the public dataset: 1 starts on Dec 21.
fn season_of(date: NaiveDate) -> u8 {
    match (date.month(), date.day()) {
        (12, d) if d >= 21 => 1,
        (1..=2, _) => 1,
        (3, d) if d < 21 => 1,
        (3..=5, _) => 2,
        (6, d) if d < 21 => 2,
        (6..=8, _) => 3,
        (9, d) if d < 23 => 3,
        _ => 4,
    }
}

fn weather_of(rng: &mut SimpleRng) -> u8 {
    match rng.next_f64() {
        p if p < 0.63 => 1,
        p if p < 0.97 => 2,
        _ => 3,
    }
}

/// Relative rental volume per hour of day, commuter peaks at 8h and 17–18h.
const HOUR_WEIGHTS: [f64; 24] = [
    0.4, 0.25, 0.15, 0.08, 0.07, 0.2, 0.8, 2.2, 3.7, 2.3, 1.7, 2.0, 2.4, 2.4, 2.2, 2.3, 3.0, 4.9,
    4.5, 3.3, 2.4, 1.8, 1.4, 0.9,
];

fn main() {
    let mut rng = SimpleRng::new(42);

    let first = NaiveDate::from_ymd_opt(2011, 1, 1).expect("valid start date");
    let days: Vec<NaiveDate> = (0..731).map(|i| first + Duration::days(i)).collect();
    let hour_total: f64 = HOUR_WEIGHTS.iter().sum();

    let out_dir = Path::new("dashboard");
    std::fs::create_dir_all(out_dir).expect("Failed to create output directory");
    let mut day_writer =
        csv::Writer::from_path(out_dir.join("day.csv")).expect("Failed to create day.csv");
    let mut hour_writer =
        csv::Writer::from_path(out_dir.join("hour.csv")).expect("Failed to create hour.csv");

    let mut hour_instant = 0;
    for (i, &date) in days.iter().enumerate() {
        let yr = u8::from(date.year() == 2012);
        let weekday = date.weekday();
        let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
        let weathersit = weather_of(&mut rng);

        // Summer peak, 2012 busier than 2011, bad weather halves demand.
        let phase = (date.ordinal() as f64 - 15.0) / 365.0 * 2.0 * std::f64::consts::PI;
        let seasonal = 1.0 - 0.6 * phase.cos();
        let growth = if yr == 1 { 1.6 } else { 1.0 };
        let weather_factor = [1.0, 0.85, 0.45][usize::from(weathersit - 1)];
        let demand = seasonal * growth * weather_factor;

        let casual_share = if weekend { 0.35 } else { 0.12 };
        let base = rng.gauss(2800.0, 250.0).max(200.0) * demand;
        let casual = (base * casual_share).round() as u64;
        let registered = (base * (1.0 - casual_share)).round() as u64;

        let row = DayRow {
            instant: i + 1,
            dteday: date.format("%Y-%m-%d").to_string(),
            season: season_of(date),
            yr,
            mnth: date.month() as u8,
            holiday: 0,
            weekday: weekday.num_days_from_sunday() as u8,
            workingday: u8::from(!weekend),
            weathersit,
            casual,
            registered,
            cnt: casual + registered,
        };

        for (hr, weight) in HOUR_WEIGHTS.iter().enumerate() {
            let share = weight / hour_total;
            let hour_casual = (casual as f64 * share).round() as u64;
            let hour_registered = (registered as f64 * share).round() as u64;
            hour_instant += 1;
            hour_writer
                .serialize(HourRow {
                    instant: hour_instant,
                    dteday: row.dteday.clone(),
                    season: row.season,
                    yr,
                    mnth: row.mnth,
                    hr: hr as u8,
                    holiday: row.holiday,
                    weekday: row.weekday,
                    workingday: row.workingday,
                    weathersit,
                    casual: hour_casual,
                    registered: hour_registered,
                    cnt: hour_casual + hour_registered,
                })
                .expect("Failed to write hour row");
        }

        day_writer.serialize(&row).expect("Failed to write day row");
    }

    day_writer.flush().expect("Failed to flush day.csv");
    hour_writer.flush().expect("Failed to flush hour.csv");

    println!(
        "Wrote {} days and {hour_instant} hours to {}",
        days.len(),
        out_dir.display()
    );
}
