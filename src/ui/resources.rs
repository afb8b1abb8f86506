use crate::ui::logic::{PRESETS, format_date, forecast_window, today};
use bevy::prelude::Resource;
use chrono::NaiveDate;

/// Contents of the search panel between frames
#[derive(Resource, Clone)]
pub struct SearchForm {
    pub name: String,
    pub date: String,
    pub latitude: f32,
    pub longitude: f32,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl Default for SearchForm {
    fn default() -> Self {
        let (first_date, last_date) = forecast_window(today());
        let home = &PRESETS[0];
        Self {
            name: home.name.to_string(),
            date: format_date(first_date),
            latitude: home.latitude,
            longitude: home.longitude,
            first_date,
            last_date,
        }
    }
}
