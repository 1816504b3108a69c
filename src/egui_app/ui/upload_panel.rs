use super::style;
use super::{EguiApp, PreviewTexture};
use crate::egui_app::view_model::{self, ClassificationView};
use eframe::egui::{
    self, Color32, ColorImage, Frame, Margin, RichText, TextureOptions, Ui, epaint::Mesh,
    epaint::Vertex,
};

const RESULTS_FADE_SECS: f32 = 0.4;
const RESULTS_RISE_PX: f32 = 14.0;
const CONFIDENCE_BAR_HEIGHT: f32 = 18.0;
const PREVIEW_MAX_SIZE: egui::Vec2 = egui::vec2(320.0, 240.0);

impl EguiApp {
    pub(super) fn render_upload_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Classify an image");
        ui.label(
            RichText::new("PNG, JPG, JPEG, GIF or BMP up to 16MB. You can also drop a file here.")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let loading = self.controller.ui.upload.loading;
            if ui
                .add_enabled(!loading, egui::Button::new("Choose image..."))
                .clicked()
            {
                self.controller.select_file_via_dialog();
            }
            match self.controller.ui.upload.selected.as_ref() {
                Some(file) => ui.label(format!(
                    "{} ({})",
                    file.file_name,
                    view_model::format_file_size(file.size)
                )),
                None => ui.label(RichText::new("No file selected").color(palette.text_muted)),
            };
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let upload = &self.controller.ui.upload;
            let submit = egui::Button::new(RichText::new(upload.submit_label()).strong());
            if ui.add_enabled(upload.can_submit(), submit).clicked() {
                self.controller.submit_upload();
            }
            if ui.button("Reset").clicked() {
                self.controller.reset_upload_form();
            }
            if self.controller.ui.upload.loading {
                ui.add(egui::Spinner::new().size(16.0));
                ui.label(RichText::new("Analyzing image...").color(palette.text_muted));
            }
        });
        ui.add_space(10.0);

        if let Some(error) = self.controller.ui.upload.error.as_deref() {
            render_error_box(ui, error);
            ui.add_space(8.0);
        }
        self.render_results(ui);
    }

    fn render_results(&mut self, ui: &mut Ui) {
        let visible = self.controller.ui.upload.results.is_some();
        let reveal = ui.ctx().animate_bool_with_time(
            egui::Id::new("classification_results_reveal"),
            visible,
            RESULTS_FADE_SECS,
        );
        let Some(view) = self.controller.ui.upload.results.clone() else {
            self.preview_tex = None;
            return;
        };
        self.sync_preview_texture(ui.ctx());

        ui.add_space((1.0 - reveal) * RESULTS_RISE_PX);
        ui.scope(|ui| {
            ui.set_opacity(reveal);
            let palette = style::palette();
            Frame::new()
                .fill(palette.bg_primary)
                .stroke(style::section_stroke())
                .corner_radius(6.0)
                .inner_margin(Margin::same(12))
                .show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        ui.vertical(|ui| {
                            ui.set_max_width(320.0);
                            render_prediction(ui, &view);
                            ui.add_space(10.0);
                            render_badge_row(ui, "Severity", &view.severity, &view.severity_class);
                            ui.add_space(6.0);
                            render_badge_row(ui, "Priority", &view.priority, &view.priority_class);
                        });
                        if let Some(texture) = self.preview_tex.as_ref() {
                            ui.add_space(16.0);
                            ui.add(
                                egui::Image::new(&texture.handle)
                                    .max_size(PREVIEW_MAX_SIZE)
                                    .maintain_aspect_ratio(true),
                            );
                        }
                    });
                });
        });
    }

    /// Upload the decoded preview once per result.
    fn sync_preview_texture(&mut self, ctx: &egui::Context) {
        let upload = &self.controller.ui.upload;
        if self
            .preview_tex
            .as_ref()
            .is_some_and(|tex| tex.revision == upload.results_revision)
        {
            return;
        }
        self.preview_tex = upload.preview.as_ref().map(|image| {
            let color_image = ColorImage::from_rgba_unmultiplied(image.size(), &image.rgba);
            PreviewTexture {
                revision: upload.results_revision,
                handle: ctx.load_texture("classification_preview", color_image, TextureOptions::LINEAR),
            }
        });
    }
}

fn render_prediction(ui: &mut Ui, view: &ClassificationView) {
    let palette = style::palette();
    Frame::new()
        .fill(palette.accent_primary)
        .corner_radius(14.0)
        .inner_margin(Margin::symmetric(14, 6))
        .show(ui, |ui| {
            ui.label(RichText::new(&view.label).size(18.0).strong().color(Color32::WHITE));
        });
    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Confidence:").strong());
        ui.label(&view.confidence_text);
    });
    paint_confidence_bar(ui, view.bar_fraction());
}

/// Full-width red to green gradient with a light overlay up to the confidence.
fn paint_confidence_bar(ui: &mut Ui, fraction: f32) {
    let width = ui.available_width().min(320.0);
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(width, CONFIDENCE_BAR_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let stops = style::confidence_gradient();
    let uv = egui::pos2(0.0, 0.0);
    let mut mesh = Mesh::default();
    for (index, color) in stops.iter().enumerate() {
        let x = rect.left() + rect.width() * index as f32 / (stops.len() - 1) as f32;
        mesh.vertices.push(Vertex {
            pos: egui::pos2(x, rect.top()),
            uv,
            color: *color,
        });
        mesh.vertices.push(Vertex {
            pos: egui::pos2(x, rect.bottom()),
            uv,
            color: *color,
        });
    }
    for i in 0..stops.len().saturating_sub(1) {
        let idx = (i * 2) as u32;
        mesh.indices
            .extend_from_slice(&[idx, idx + 2, idx + 3, idx, idx + 3, idx + 1]);
    }
    painter.add(egui::Shape::mesh(mesh));

    let filled = egui::Rect::from_min_size(
        rect.min,
        egui::vec2(rect.width() * fraction.clamp(0.0, 1.0), rect.height()),
    );
    painter.rect_filled(filled, 0.0, style::with_alpha(Color32::WHITE, 77));
}

fn render_badge_row(ui: &mut Ui, title: &str, value: &str, class: &str) {
    let (fill, text) = style::badge_colors(class);
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{title}:")).strong());
        Frame::new()
            .fill(fill)
            .corner_radius(10.0)
            .inner_margin(Margin::symmetric(10, 3))
            .show(ui, |ui| {
                ui.label(RichText::new(value).color(text).strong());
            });
    });
}

pub(super) fn render_error_box(ui: &mut Ui, message: &str) {
    let palette = style::palette();
    Frame::new()
        .fill(style::with_alpha(palette.danger, 40))
        .stroke(egui::Stroke::new(1.0, palette.danger))
        .corner_radius(4.0)
        .inner_margin(Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.label(RichText::new(message).color(palette.danger));
        });
}
