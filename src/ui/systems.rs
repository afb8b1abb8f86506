use crate::globe::events::{LocationSelected, ResetView};
use crate::globe::resources::CurrentSelection;
use crate::ui::logic::{PRESETS, is_valid_date};
use crate::ui::resources::SearchForm;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

pub fn render_search_panel(
    mut contexts: EguiContexts,
    mut form: ResMut<SearchForm>,
    current: Res<CurrentSelection>,
    mut selected_events: MessageWriter<LocationSelected>,
    mut reset_events: MessageWriter<ResetView>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::left("search_panel")
        .default_width(280.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Zeus");
            ui.add_space(10.0);

            ui.label("Location");
            ui.text_edit_singleline(&mut form.name);
            ui.add(egui::Slider::new(&mut form.latitude, -90.0..=90.0).text("Latitude"));
            ui.add(egui::Slider::new(&mut form.longitude, -180.0..=180.0).text("Longitude"));
            ui.add_space(5.0);

            ui.label(format!("Date ({} to {})", form.first_date, form.last_date));
            let date_changed = ui.text_edit_singleline(&mut form.date).changed();
            let date_valid = is_valid_date(&form.date, form.first_date, form.last_date);
            if !date_valid {
                ui.colored_label(egui::Color32::LIGHT_RED, "Pick a date in the forecast window");
            }

            // A new date for the place already shown refreshes it
            if date_changed
                && date_valid
                && let Some(selection) = &current.selection
            {
                selected_events.write(LocationSelected {
                    name: selection.name.clone(),
                    date: form.date.clone(),
                    latitude: selection.geo.latitude,
                    longitude: selection.geo.longitude,
                });
            }

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let fly = ui.add_enabled(date_valid && !form.name.trim().is_empty(), egui::Button::new("Fly to"));
                if fly.clicked() {
                    selected_events.write(LocationSelected {
                        name: form.name.trim().to_string(),
                        date: form.date.clone(),
                        latitude: form.latitude,
                        longitude: form.longitude,
                    });
                }
                if ui.button("Reset view").clicked() {
                    reset_events.write(ResetView);
                }
            });

            ui.separator();
            ui.label("Presets");
            for preset in &PRESETS {
                if ui.add_enabled(date_valid, egui::Button::new(preset.name)).clicked() {
                    form.name = preset.name.to_string();
                    form.latitude = preset.latitude;
                    form.longitude = preset.longitude;
                    selected_events.write(LocationSelected {
                        name: form.name.clone(),
                        date: form.date.clone(),
                        latitude: form.latitude,
                        longitude: form.longitude,
                    });
                }
            }

            ui.separator();
            ui.small("Drag to orbit, scroll to zoom, F5 reloads the config");
        });
}

pub fn render_info_panel(mut contexts: EguiContexts, current: Res<CurrentSelection>) {
    let Some(selection) = &current.selection else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("info_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.strong(&selection.name);
            ui.separator();
            ui.label(&selection.date);
            ui.separator();
            ui.label(format!(
                "{:.4}, {:.4}",
                selection.geo.latitude, selection.geo.longitude
            ));
        });
    });
}
