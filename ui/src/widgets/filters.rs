//! Filter controls. Each edits the table query copy held by [`record_table`](super::record_table).

use chrono::{DateTime, Duration, NaiveTime, Utc};
use egui::{ComboBox, TextEdit, Ui};
use linkup_business::{
    query::{DateRange, NumericRange},
    tables::{FieldOf, Table, TableQuery},
};

pub fn search_box<T: Table>(ui: &mut Ui, edited: &mut TableQuery<T>) {
    let mut search = edited.query().filter().search().to_owned();
    let response = ui.add(
        TextEdit::singleline(&mut search)
            .hint_text("Search")
            .desired_width(180.0),
    );
    if response.changed() {
        edited.query_mut().set_search(search);
    }
}

/// A menu of checkboxes. Nothing checked means every value passes.
pub fn selection_filter<T: Table>(
    ui: &mut Ui,
    edited: &mut TableQuery<T>,
    label: &str,
    field: FieldOf<T>,
    options: &[(&str, &str)],
) {
    let selected = edited
        .query()
        .filter()
        .selection(field)
        .map_or(0, |set| set.len());
    let title = if selected == 0 {
        label.to_owned()
    } else {
        format!("{label} ({selected})")
    };

    ui.menu_button(title, |ui| {
        for &(value, text) in options {
            let mut on = edited.query().filter().is_selected(field, value);
            if ui.checkbox(&mut on, text).changed() {
                edited.query_mut().toggle_selection(field, value);
            }
        }
        if selected > 0 && ui.button("Clear").clicked() {
            edited
                .query_mut()
                .edit_filter(|filter| filter.clear_selection(field));
        }
    });
}

/// Any / Yes / No.
pub fn flag_filter<T: Table>(
    ui: &mut Ui,
    edited: &mut TableQuery<T>,
    label: &str,
    field: FieldOf<T>,
) {
    let current = edited.query().filter().flag(field);
    let mut value = current;
    ComboBox::from_label(label)
        .selected_text(flag_text(value))
        .show_ui(ui, |ui| {
            for option in [None, Some(true), Some(false)] {
                ui.selectable_value(&mut value, option, flag_text(option));
            }
        });
    if value != current {
        edited
            .query_mut()
            .edit_filter(|filter| filter.set_flag(field, value));
    }
}

fn flag_text(value: Option<bool>) -> &'static str {
    match value {
        None => "Any",
        Some(true) => "Yes",
        Some(false) => "No",
    }
}

/// Inclusive bounds; an empty box leaves that side open.
pub fn range_filter<T: Table>(
    ui: &mut Ui,
    edited: &mut TableQuery<T>,
    label: &str,
    field: FieldOf<T>,
) {
    let range = edited.query().filter().numeric_range(field);
    let mut min = bound_text(range.min);
    let mut max = bound_text(range.max);

    ui.label(label);
    let min_changed = ui
        .add(TextEdit::singleline(&mut min).hint_text("min").desired_width(40.0))
        .changed();
    ui.label("–");
    let max_changed = ui
        .add(TextEdit::singleline(&mut max).hint_text("max").desired_width(40.0))
        .changed();

    if min_changed || max_changed {
        let next = NumericRange::new(parse_bound(&min), parse_bound(&max));
        if next != range {
            edited
                .query_mut()
                .edit_filter(|filter| filter.set_numeric_range(field, next));
        }
    }
}

/// Quick date windows relative to `now`.
pub fn date_filter<T: Table>(
    ui: &mut Ui,
    edited: &mut TableQuery<T>,
    label: &str,
    field: FieldOf<T>,
    now: DateTime<Utc>,
) {
    let current = edited.query().filter().date_range(field);
    let mut choice = DATE_WINDOWS
        .iter()
        .position(|&(_, days)| window(now, days) == current)
        .unwrap_or(usize::MAX);
    let before = choice;

    let selected = DATE_WINDOWS.get(choice).map_or("Custom", |&(text, _)| text);
    ComboBox::from_label(label)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for (index, &(text, _)) in DATE_WINDOWS.iter().enumerate() {
                ui.selectable_value(&mut choice, index, text);
            }
        });

    if choice != before
        && let Some(&(_, days)) = DATE_WINDOWS.get(choice)
    {
        edited
            .query_mut()
            .edit_filter(|filter| filter.set_date_range(field, window(now, days)));
    }
}

const DATE_WINDOWS: [(&str, Option<i64>); 4] = [
    ("Any time", None),
    ("Last 7 days", Some(7)),
    ("Last 30 days", Some(30)),
    ("Last 90 days", Some(90)),
];

/// Windows start at midnight so the selection stays stable through the day.
fn window(now: DateTime<Utc>, days: Option<i64>) -> DateRange {
    match days {
        None => DateRange::default(),
        Some(days) => {
            let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
            DateRange::new(Some(midnight - Duration::days(days)), None)
        }
    }
}

/// Shown once any criterion is active.
pub fn clear_filters<T: Table>(ui: &mut Ui, edited: &mut TableQuery<T>) {
    let active = edited.query().filter().active_count();
    if active > 0 && ui.button(format!("Clear filters ({active})")).clicked() {
        edited.query_mut().clear_filters();
    }
}

fn bound_text(bound: Option<f64>) -> String {
    bound.map(|value| value.to_string()).unwrap_or_default()
}

fn parse_bound(text: &str) -> Option<f64> {
    text.trim()
        .parse()
        .ok()
        .filter(|value: &f64| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_parse_loosely() {
        assert_eq!(parse_bound(" 18 "), Some(18.0));
        assert_eq!(parse_bound(""), None);
        assert_eq!(parse_bound("abc"), None);
        assert_eq!(parse_bound("NaN"), None);
        assert_eq!(parse_bound("inf"), None);
        assert_eq!(parse_bound("-infinity"), None);
        assert_eq!(bound_text(Some(2.5)), "2.5");
        assert_eq!(bound_text(None), "");
    }

    #[test]
    fn windows_start_at_midnight() {
        use chrono::TimeZone;

        let morning = Utc.with_ymd_and_hms(2024, 6, 8, 9, 30, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 6, 8, 21, 0, 0).unwrap();
        assert!(window(morning, None).is_unbounded());

        let week = window(morning, Some(7));
        assert_eq!(week.from, Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()));
        assert_eq!(week.to, None);
        assert_eq!(week, window(evening, Some(7)));
    }
}
