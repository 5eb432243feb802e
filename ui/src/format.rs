//! Text shown in table cells and detail views.

use chrono::{DateTime, Utc};

pub fn date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub fn date_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// `"—"` for a missing date.
pub fn maybe_date(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| "—".to_owned(), date)
}

pub fn price(amount: f64) -> String {
    if amount <= 0.0 {
        "Free".to_owned()
    } else {
        format!("${amount:.2}")
    }
}

pub fn percent(ratio: f32) -> String {
    format!("{:.0}%", ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn formats() {
        let at = Utc.with_ymd_and_hms(2024, 5, 3, 14, 5, 0).unwrap();
        assert_eq!(date(at), "2024-05-03");
        assert_eq!(date_time(at), "2024-05-03 14:05");
        assert_eq!(maybe_date(None), "—");
        assert_eq!(price(0.0), "Free");
        assert_eq!(price(12.5), "$12.50");
        assert_eq!(percent(0.256), "26%");
    }
}
