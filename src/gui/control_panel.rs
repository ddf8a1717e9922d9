//! Control Panel Widget
//! Left side panel with the data source, year slider and sort selector.

use crate::charts::{SortMode, ViewState};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side control panel. Holds the values the chart reads its state from.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub year: i32,
    pub year_range: Option<(i32, i32)>,
    pub sort_mode: SortMode,
    pub status: String,
    pub is_busy: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            year: 0,
            year_range: None,
            sort_mode: SortMode::default(),
            status: "Ready".to_string(),
            is_busy: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the slider bounds after a new dataset is loaded.
    pub fn update_years(&mut self, year_range: Option<(i32, i32)>, year: i32) {
        self.year_range = year_range;
        self.year = year;
    }

    /// Current control values, as read by the chart on initialisation.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            year: self.year,
            sort_mode: self.sort_mode,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌪 Disaster Bars")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Occurrences per type and year")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            ui.visuals().text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!self.is_busy, |ui| {
                            if ui.button("📂 Browse").clicked() {
                                action = ControlPanelAction::BrowseCsv;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Year Section =====
        ui.label(RichText::new("📅 Year").size(14.0).strong());
        ui.add_space(5.0);

        match self.year_range {
            Some((min, max)) => {
                let response = ui.add(egui::Slider::new(&mut self.year, min..=max).integer());
                // Commit on release while dragging, immediately for clicks and keys
                if response.drag_stopped() || (response.changed() && !response.dragged()) {
                    action = ControlPanelAction::YearChanged(self.year);
                }
            }
            None => {
                ui.label(RichText::new("No years available").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Sort Section =====
        ui.label(RichText::new("↕ Sort").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("sort_mode")
            .width(180.0)
            .selected_text(self.sort_mode.label())
            .show_ui(ui, |ui| {
                for mode in SortMode::ALL {
                    if ui
                        .selectable_label(self.sort_mode == mode, mode.label())
                        .clicked()
                        && self.sort_mode != mode
                    {
                        self.sort_mode = mode;
                        action = ControlPanelAction::SortChanged(mode);
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.horizontal(|ui| {
            if self.is_busy {
                ui.spinner();
            }
            let status_color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else if self.status.starts_with("Loaded") {
                Color32::from_rgb(40, 167, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        });

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    YearChanged(i32),
    SortChanged(SortMode),
}
