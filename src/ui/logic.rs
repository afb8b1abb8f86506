use chrono::{Days, Local, NaiveDate};

/// Forecasts only reach this many days ahead
pub const FORECAST_DAYS: u64 = 16;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct Preset {
    pub name: &'static str,
    pub latitude: f32,
    pub longitude: f32,
}

pub const PRESETS: [Preset; 6] = [
    Preset { name: "London", latitude: 51.5074, longitude: -0.1278 },
    Preset { name: "New York", latitude: 40.7128, longitude: -74.006 },
    Preset { name: "Tokyo", latitude: 35.6762, longitude: 139.6503 },
    Preset { name: "Sydney", latitude: -33.8688, longitude: 151.2093 },
    Preset { name: "Cairo", latitude: 30.0444, longitude: 31.2357 },
    Preset { name: "Rio de Janeiro", latitude: -22.9068, longitude: -43.1729 },
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// First and last selectable date: tomorrow through the end of the forecast.
pub fn forecast_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.checked_add_days(Days::new(1)).unwrap_or(today);
    let last = today.checked_add_days(Days::new(FORECAST_DAYS)).unwrap_or(first);
    (first, last)
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A real calendar date inside `[first, last]`.
pub fn is_valid_date(date: &str, first: NaiveDate, last: NaiveDate) -> bool {
    parse_date(date).is_some_and(|date| (first..=last).contains(&date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_forecast_window_starts_tomorrow() {
        let (first, last) = forecast_window(ymd(2024, 6, 1));
        assert_eq!(first, ymd(2024, 6, 2));
        assert_eq!(last, ymd(2024, 6, 17));
    }

    #[test]
    fn test_forecast_window_crosses_year_end() {
        let (first, last) = forecast_window(ymd(2026, 12, 31));
        assert_eq!(format_date(first), "2027-01-01");
        assert_eq!(format_date(last), "2027-01-16");
    }

    #[rstest]
    #[case("2024-06-02", true)]
    #[case("2024-06-17", true)]
    #[case("2024-06-01", false)] // today is outside the window
    #[case("2024-06-18", false)]
    #[case("2024/06/05", false)]
    #[case("", false)]
    fn test_is_valid_date(#[case] date: &str, #[case] expected: bool) {
        assert_eq!(is_valid_date(date, ymd(2024, 6, 2), ymd(2024, 6, 17)), expected);
    }

    #[rstest]
    #[case("2024-02-29", ymd(2024, 2, 20), true)] // leap day
    #[case("2024-02-30", ymd(2024, 2, 20), false)]
    #[case("2024-02-31", ymd(2024, 2, 20), false)]
    #[case("2023-02-29", ymd(2023, 2, 20), false)]
    #[case("2023-03-01", ymd(2023, 2, 20), true)]
    fn test_month_end_dates_must_exist(#[case] date: &str, #[case] today: NaiveDate, #[case] expected: bool) {
        let (first, last) = forecast_window(today);
        assert_eq!(is_valid_date(date, first, last), expected);
    }

    #[test]
    fn test_formatted_dates_parse_back() {
        let date = ymd(2025, 1, 9);
        assert_eq!(format_date(date), "2025-01-09");
        assert_eq!(parse_date(&format_date(date)), Some(date));
    }

    #[test]
    fn test_presets_are_on_the_map() {
        for preset in &PRESETS {
            assert!((-90.0..=90.0).contains(&preset.latitude), "{}", preset.name);
            assert!((-180.0..=180.0).contains(&preset.longitude), "{}", preset.name);
        }
    }
}
