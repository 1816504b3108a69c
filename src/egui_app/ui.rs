//! egui renderer for the application UI.

pub(crate) mod style;
mod training_panel;
mod upload_panel;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app_dirs;
use crate::backend::HttpBackend;
use crate::config;
use crate::egui_app::controller::EguiController;
use crate::egui_app::state::{AppTab, StatusTone};
use eframe::egui::{self, Frame, Margin, RichText, StrokeKind, TextureHandle};

/// Smallest window that still fits both panels.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(640.0, 520.0);
/// Repaint cadence while a request or the progress timer is running.
const ACTIVE_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    preview_tex: Option<PreviewTexture>,
}

struct PreviewTexture {
    revision: u64,
    handle: TextureHandle,
}

impl EguiApp {
    /// Create the app from persisted configuration and the HTTP backend.
    pub fn new() -> Result<Self, String> {
        let settings =
            config::load_or_default().map_err(|err| format!("Failed to load config: {err}"))?;
        let backend = HttpBackend::new(&settings.server).map_err(|err| err.to_string())?;
        tracing::info!(
            upload = %backend.upload_url(),
            train = %backend.train_url(),
            "Classifier endpoints resolved"
        );
        let mut controller = EguiController::new(settings, Arc::new(backend));
        controller.enable_settings_persistence();
        Ok(Self::with_controller(controller))
    }

    pub fn with_controller(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
            preview_tex: None,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if dropped.is_empty() {
            return;
        }
        self.controller.ui.tab = AppTab::Classify;
        self.controller.handle_dropped_files(dropped);
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(10, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Civic Issues Classifier")
                            .strong()
                            .color(palette.text_primary),
                    );
                    ui.separator();
                    for tab in [AppTab::Classify, AppTab::Train] {
                        let selected = self.controller.ui.tab == tab;
                        if ui.selectable_label(selected, tab.label()).clicked() {
                            self.controller.ui.tab = tab;
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Open log folder").clicked() {
                            self.open_log_folder();
                        }
                        ui.label(
                            RichText::new(&self.controller.ui.server_label)
                                .color(palette.text_muted),
                        );
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .stroke(style::section_stroke())
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    let (badge_rect, _) =
                        ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(badge_rect, 2.0, style::status_badge_color(status.tone));
                    ui.painter().rect_stroke(
                        badge_rect,
                        2.0,
                        style::section_stroke(),
                        StrokeKind::Inside,
                    );
                    ui.label(RichText::new(status.tone.label()).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }

    fn render_drop_hint(&self, ctx: &egui::Context) {
        let hovering = ctx.input(|i| i.raw.hovered_files.iter().any(|f| f.path.is_some()));
        if !hovering {
            return;
        }
        let palette = style::palette();
        egui::Area::new(egui::Id::new("drop_hint"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                Frame::new()
                    .fill(style::with_alpha(palette.bg_primary, 230))
                    .stroke(egui::Stroke::new(2.0, palette.accent_primary))
                    .corner_radius(6.0)
                    .inner_margin(Margin::same(16))
                    .show(ui, |ui| {
                        ui.label(RichText::new("Drop an image to classify").size(18.0));
                    });
            });
    }

    fn open_log_folder(&mut self) {
        let result = app_dirs::logs_dir()
            .map_err(|err| err.to_string())
            .and_then(|dir| open::that(&dir).map_err(|err| err.to_string()));
        if let Err(err) = result {
            tracing::warn!("Failed to open log folder: {err}");
            self.controller
                .set_status(format!("Could not open log folder: {err}"), StatusTone::Error);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.handle_dropped_files(ctx);
        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| match self.controller.ui.tab {
                    AppTab::Classify => self.render_upload_panel(ui),
                    AppTab::Train => self.render_training_panel(ui),
                });
        });
        self.render_drop_hint(ctx);
        if self.controller.has_active_jobs() {
            ctx.request_repaint_after(ACTIVE_REPAINT_INTERVAL);
        }
    }
}
