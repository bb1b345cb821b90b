use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::report::Metrics;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – image and date range
// ---------------------------------------------------------------------------

/// Render the left sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Image (centered) ----
    if let Some(bytes) = &state.sidebar_image {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::from_bytes("bytes://sidebar-image", bytes.clone())
                    .max_width(ui.available_width() * 0.9)
                    .max_height(180.0)
                    .rounding(4.0),
            );
        });
    } else if let Some(warning) = &state.image_warning {
        ui.label(RichText::new(warning).small().color(Color32::YELLOW));
    }
    ui.add_space(4.0);

    ui.heading("Date range");
    ui.separator();

    let range = state.range();

    let mut start = range.start();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        ui.add(DatePickerButton::new(&mut start).id_salt("range_start"));
    });
    if start != range.start() {
        state.set_start(start);
    }

    let range = state.range();
    let mut end = range.end();
    ui.horizontal(|ui: &mut Ui| {
        ui.label("To");
        ui.add(DatePickerButton::new(&mut end).id_salt("range_end"));
    });
    if end != range.end() {
        state.set_end(end);
    }

    ui.add_space(4.0);
    if ui.small_button("Full range").clicked() {
        state.reset_range();
    }

    ui.add_space(8.0);
    ui.label(
        RichText::new(format!(
            "Data available {} to {}",
            state.bounds.start(),
            state.bounds.end()
        ))
        .small()
        .weak(),
    );
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("🚲 Bike Sharing");
        ui.separator();

        ui.label(format!(
            "{} days, {} hourly records loaded",
            state.dataset.daily.len(),
            state.dataset.hourly.len()
        ));

        ui.separator();
        ui.label(format!("Showing {}", state.range()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metric row
// ---------------------------------------------------------------------------

/// The three headline numbers side by side.
pub fn metrics_row(ui: &mut Ui, metrics: &Metrics) {
    ui.heading("Daily rentals");
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total rentals", metrics.rentals);
        metric(&mut cols[1], "Registered users", metrics.registered);
        metric(&mut cols[2], "Casual users", metrics.casual);
    });
}

fn metric(ui: &mut Ui, label: &str, value: u64) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(format_count(value)).size(28.0).strong());
    });
}

/// `1234567` → `1,234,567`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
