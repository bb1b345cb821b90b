use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, PlotUi, Points};

use crate::color::{ColorMap, CASUAL_BLUE, REGISTERED_ORANGE, TREND_BLUE};
use crate::data::aggregate::{MonthlyAggregate, SeasonWeatherAggregate, YearUserTotal};
use crate::data::model::{weather_label, CountColumn, Season};
use crate::state::AppState;
use crate::ui::panels;

const CHART_HEIGHT: f32 = 280.0;

/// Share of a category slot taken by its bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the metrics and the four charts.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let report = &state.report;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            panels::metrics_row(ui, &report.metrics);
            ui.add_space(12.0);

            ui.heading("What is the monthly trend in bike rentals?");
            monthly_trend(ui, &report.monthly_trend);
            ui.add_space(12.0);

            ui.heading("How do weather and season relate to rentals?");
            season_weather(ui, &report.season_weather);
            ui.add_space(12.0);

            ui.heading("How do casual and registered rentals change month to month?");
            user_type_by_month(ui, &report.user_type_by_month);
            ui.add_space(12.0);

            ui.heading("Registered vs casual users, 2011 vs 2012");
            year_comparison(ui, &report.year_comparison);
        });
}

// ---------------------------------------------------------------------------
// Chart 1 – monthly trend (whole dataset)
// ---------------------------------------------------------------------------

fn monthly_trend(ui: &mut Ui, months: &[MonthlyAggregate]) {
    let labels = months.iter().map(|m| m.label.to_string()).collect();
    let points: Vec<[f64; 2]> = months
        .iter()
        .enumerate()
        .map(|(i, m)| [i as f64, m.cnt as f64])
        .collect();

    category_plot(ui, "monthly_trend", labels, "Rentals", |plot_ui| {
        plot_ui.line(
            Line::new(PlotPoints::from(points.clone()))
                .name("Rentals")
                .color(TREND_BLUE)
                .width(2.0),
        );
        plot_ui.points(Points::new(points).color(TREND_BLUE).radius(4.0));
    });
}

// ---------------------------------------------------------------------------
// Chart 2 – season × weather (filtered)
// ---------------------------------------------------------------------------

fn season_weather(ui: &mut Ui, rows: &[SeasonWeatherAggregate]) {
    let seasons: Vec<Season> = Season::ALL
        .into_iter()
        .filter(|s| rows.iter().any(|r| r.season == *s))
        .collect();
    let weathers: BTreeSet<u8> = rows.iter().map(|r| r.weather).collect();

    let colors = ColorMap::new(weathers.iter().map(|w| weather_label(*w)));
    let offsets = bar_offsets(weathers.len(), GROUP_WIDTH);
    let width = bar_width(weathers.len(), GROUP_WIDTH);

    let charts: Vec<BarChart> = weathers
        .iter()
        .zip(offsets)
        .map(|(&weather, offset)| {
            let name = weather_label(weather);
            let bars = seasons
                .iter()
                .enumerate()
                .filter_map(|(i, season)| {
                    let row = rows
                        .iter()
                        .find(|r| r.season == *season && r.weather == weather)?;
                    Some(
                        Bar::new(i as f64 + offset, row.cnt as f64)
                            .width(width)
                            .name(format!("{season}, {name}")),
                    )
                })
                .collect();
            BarChart::new(bars).color(colors.color_for(&name)).name(name)
        })
        .collect();

    let labels = seasons.iter().map(|s| s.label().to_string()).collect();
    category_plot(ui, "season_weather", labels, "Rentals", |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Chart 3 – casual vs registered per month (filtered)
// ---------------------------------------------------------------------------

fn user_type_by_month(ui: &mut Ui, months: &[MonthlyAggregate]) {
    let labels = months.iter().map(|m| m.label.to_string()).collect();
    let series = |value: fn(&MonthlyAggregate) -> u64| -> Vec<[f64; 2]> {
        months
            .iter()
            .enumerate()
            .map(|(i, m)| [i as f64, value(m) as f64])
            .collect()
    };
    let casual = series(|m| m.casual);
    let registered = series(|m| m.registered);

    category_plot(ui, "user_type_by_month", labels, "Rentals", |plot_ui| {
        for (name, points, color) in [
            ("Casual users", casual, CASUAL_BLUE),
            ("Registered users", registered, REGISTERED_ORANGE),
        ] {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .name(name)
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(Points::new(points).name(name).color(color).radius(4.0));
        }
    });
}

// ---------------------------------------------------------------------------
// Chart 4 – year over year (whole dataset)
// ---------------------------------------------------------------------------

fn year_comparison(ui: &mut Ui, rows: &[YearUserTotal]) {
    let years: Vec<i32> = rows
        .iter()
        .map(|r| r.id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let user_types = [CountColumn::Casual, CountColumn::Registered];

    let offsets = bar_offsets(user_types.len(), GROUP_WIDTH);
    let width = bar_width(user_types.len(), GROUP_WIDTH);

    let charts: Vec<BarChart> = user_types
        .iter()
        .zip(offsets)
        .map(|(&user_type, offset)| {
            let bars = rows
                .iter()
                .filter(|r| r.variable == user_type)
                .filter_map(|r| {
                    let slot = years.iter().position(|y| *y == r.id)?;
                    Some(
                        Bar::new(slot as f64 + offset, r.value as f64)
                            .width(width)
                            .name(format!("{} {}", r.id, user_type)),
                    )
                })
                .collect();
            let color = match user_type {
                CountColumn::Casual => CASUAL_BLUE,
                _ => REGISTERED_ORANGE,
            };
            BarChart::new(bars).color(color).name(user_type.name())
        })
        .collect();

    let labels = years.iter().map(|y| y.to_string()).collect();
    category_plot(ui, "year_comparison", labels, "Total users", |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Shared plot setup
// ---------------------------------------------------------------------------

/// A fixed plot whose x axis shows `labels` at positions 0, 1, 2, ….
fn category_plot(
    ui: &mut Ui,
    id: &str,
    labels: Vec<String>,
    y_label: &str,
    add_contents: impl FnOnce(&mut PlotUi),
) {
    let slots = labels.len().max(1) as f64;

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(y_label)
        .include_x(-0.5)
        .include_x(slots - 0.5)
        .include_y(0.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, add_contents);
}

/// Label for an axis mark: only whole positions that name a category get text.
fn category_label(labels: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

/// Bar centres relative to the category position, for `series` bars sharing
/// a slot of `group_width`.
pub fn bar_offsets(series: usize, group_width: f64) -> Vec<f64> {
    let width = bar_width(series, group_width);
    (0..series)
        .map(|i| (i as f64 + 0.5) * width - group_width / 2.0)
        .collect()
}

fn bar_width(series: usize, group_width: f64) -> f64 {
    group_width / series.max(1) as f64
}
