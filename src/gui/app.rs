//! Disaster Bars Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{ChartView, SortMode};
use crate::config::ChartConfig;
use crate::data::{load_records, Aggregation, Aggregator};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info};

/// CSV loading result from background thread
enum LoadResult {
    Complete {
        path: PathBuf,
        aggregation: Aggregation,
    },
    Error {
        path: PathBuf,
        message: String,
    },
}

/// Values taken from the command line for the first load.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub csv: PathBuf,
    pub year: Option<i32>,
    pub sort_mode: SortMode,
}

/// Main application window.
pub struct DisasterApp {
    config: ChartConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    requested_year: Option<i32>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DisasterApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: ChartConfig,
        startup: StartupOptions,
    ) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.sort_mode = startup.sort_mode;

        let mut app = Self {
            chart_viewer: ChartViewer::new(&config),
            config,
            control_panel,
            requested_year: startup.year,
            load_rx: None,
            is_loading: false,
        };

        app.start_loading(startup.csv);
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Read and aggregate the CSV on a background thread.
    fn start_loading(&mut self, path: PathBuf) {
        self.chart_viewer.clear();
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.control_panel.is_busy = true;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let columns = self.config.columns.clone();

        thread::spawn(move || {
            let result = match load_records(&path, &columns) {
                Ok(records) => LoadResult::Complete {
                    aggregation: Aggregator::aggregate(records),
                    path,
                },
                Err(e) => LoadResult::Error {
                    message: e.to_string(),
                    path,
                },
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self, now: f64) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { path, aggregation }) => {
                self.finish_loading();
                self.show_aggregation(&path, aggregation, now);
            }
            Ok(LoadResult::Error { path, message }) => {
                self.finish_loading();
                error!(path = %path.display(), %message, "failed to load CSV");
                self.control_panel.set_status(&format!("Error: {}", message));
                self.chart_viewer
                    .set_error(format!("Could not load {}: {}", path.display(), message));
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.finish_loading();
                error!("CSV loader thread stopped before reporting a result");
                self.control_panel.set_status("Error: loader stopped unexpectedly");
                self.chart_viewer
                    .set_error("Could not load CSV: loader stopped unexpectedly".to_string());
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.is_busy = false;
    }

    fn show_aggregation(&mut self, path: &std::path::Path, aggregation: Aggregation, now: f64) {
        let report = aggregation.report;
        info!(
            path = %path.display(),
            rows = report.total_rows,
            skipped = report.skipped(),
            "loaded rows"
        );

        let year_range = aggregation.year_range();
        let year = self
            .requested_year
            .take()
            .or(year_range.map(|(min, _)| min))
            .unwrap_or(self.control_panel.year);
        self.control_panel.update_years(year_range, year);
        self.control_panel.set_status(&format!(
            "Loaded {} rows ({} skipped), {} disaster types",
            report.total_rows,
            report.skipped(),
            aggregation.categories.len()
        ));

        let chart = ChartView::initialize(
            aggregation.rows,
            &aggregation.categories,
            self.control_panel.view_state(),
            &self.config,
            now,
        );
        self.chart_viewer.set_chart(chart);
    }

    fn handle_action(&mut self, action: ControlPanelAction, now: f64) {
        match action {
            ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
            ControlPanelAction::YearChanged(year) => {
                if let Some(chart) = self.chart_viewer.chart_mut() {
                    chart.on_year_change(year, now);
                }
            }
            ControlPanelAction::SortChanged(mode) => {
                if let Some(chart) = self.chart_viewer.chart_mut() {
                    chart.on_sort_change(mode, now);
                }
            }
            ControlPanelAction::None => {}
        }
    }
}

impl eframe::App for DisasterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.check_load_results(now);
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action, now);
                });
            });

        // Central panel - Chart Viewer
        let is_loading = self.is_loading;
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui, is_loading);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::Sender;

    fn app_with_channel() -> (DisasterApp, Sender<LoadResult>) {
        let (tx, rx) = channel();
        let config = ChartConfig::default();
        let app = DisasterApp {
            chart_viewer: ChartViewer::new(&config),
            config,
            control_panel: ControlPanel::new(),
            requested_year: None,
            load_rx: Some(rx),
            is_loading: true,
        };
        (app, tx)
    }

    #[test]
    fn dropped_loader_surfaces_an_error() {
        let (mut app, tx) = app_with_channel();
        drop(tx);

        app.check_load_results(0.0);

        assert!(!app.is_loading);
        assert!(!app.control_panel.is_busy);
        assert!(app.control_panel.status.starts_with("Error"));
        assert_eq!(
            app.chart_viewer.error(),
            Some("Could not load CSV: loader stopped unexpectedly")
        );
    }

    #[test]
    fn load_error_is_shown_in_the_chart_container() {
        let (mut app, tx) = app_with_channel();
        let sent = tx.send(LoadResult::Error {
            path: PathBuf::from("disasters.csv"),
            message: "File not found".to_string(),
        });
        assert!(sent.is_ok());

        app.check_load_results(0.0);

        assert!(!app.is_loading);
        assert_eq!(app.control_panel.status, "Error: File not found");
        assert_eq!(
            app.chart_viewer.error(),
            Some("Could not load disasters.csv: File not found")
        );
    }

    #[test]
    fn pending_load_keeps_waiting() {
        let (mut app, _tx) = app_with_channel();

        app.check_load_results(0.0);

        assert!(app.is_loading);
        assert!(app.load_rx.is_some());
        assert_eq!(app.chart_viewer.error(), None);
    }

    #[test]
    fn completed_load_starts_at_the_earliest_year() {
        let (mut app, tx) = app_with_channel();
        let records = [("Flood", "2003"), ("Storm", "2001")]
            .iter()
            .map(|&(t, y)| crate::data::RawRecord::from_fields(Some(t), Some(y)));
        let sent = tx.send(LoadResult::Complete {
            path: PathBuf::from("disasters.csv"),
            aggregation: Aggregator::aggregate(records),
        });
        assert!(sent.is_ok());

        app.check_load_results(0.0);

        assert!(!app.is_loading);
        assert_eq!(app.control_panel.year, 2001);
        assert_eq!(app.control_panel.year_range, Some((2001, 2003)));
        assert!(app.chart_viewer.chart_mut().is_some());
        assert_eq!(app.chart_viewer.error(), None);
    }
}
