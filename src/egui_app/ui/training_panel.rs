use super::EguiApp;
use super::style;
use super::upload_panel::render_error_box;
use eframe::egui::{self, Frame, Margin, ProgressBar, RichText, Ui};

const LOG_HEIGHT: f32 = 180.0;

impl EguiApp {
    pub(super) fn render_training_panel(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Train the model");
        ui.label(
            RichText::new("The service trains on a dataset folder on its own disk.")
                .color(palette.text_muted),
        );
        ui.add_space(8.0);

        let busy = self.controller.ui.training.busy;
        egui::Grid::new("training_form")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                let form = &mut self.controller.ui.training.form;
                ui.label("Dataset path");
                ui.add_enabled(
                    !busy,
                    egui::TextEdit::singleline(&mut form.dataset_path)
                        .hint_text("/path/to/dataset")
                        .desired_width(320.0),
                );
                ui.end_row();
                ui.label("Epochs");
                ui.add_enabled(
                    !busy,
                    egui::TextEdit::singleline(&mut form.epochs).desired_width(80.0),
                );
                ui.end_row();
                ui.label("Batch size");
                ui.add_enabled(
                    !busy,
                    egui::TextEdit::singleline(&mut form.batch_size).desired_width(80.0),
                );
                ui.end_row();
            });
        ui.add_space(8.0);

        let label = self.controller.ui.training.submit_label();
        if ui
            .add_enabled(!busy, egui::Button::new(RichText::new(label).strong()))
            .clicked()
        {
            self.controller.start_training();
        }
        ui.add_space(10.0);

        if let Some(error) = self.controller.ui.training.error.as_deref() {
            render_error_box(ui, error);
            ui.add_space(8.0);
        }
        self.render_training_progress(ui);
        self.render_training_result(ui);
    }

    fn render_training_progress(&mut self, ui: &mut Ui) {
        let training = &self.controller.ui.training;
        let Some(progress) = training.progress.as_ref() else {
            return;
        };
        let palette = style::palette();
        ui.label(RichText::new("Simulated progress").strong());
        ui.label(
            RichText::new("Estimated locally; the service does not report training progress.")
                .small()
                .color(palette.text_muted),
        );
        ui.add(
            ProgressBar::new(progress.fraction())
                .desired_width(ui.available_width().min(480.0))
                .text(format!("{}%", progress.label)),
        );
        ui.add_space(6.0);
        Frame::new()
            .fill(palette.bg_primary)
            .stroke(style::section_stroke())
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("training_log_scroll")
                    .max_height(LOG_HEIGHT)
                    .stick_to_bottom(true)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        for entry in &training.log {
                            ui.label(
                                RichText::new(entry.display_line())
                                    .monospace()
                                    .color(style::log_line_color(entry.kind)),
                            );
                        }
                    });
            });
        ui.add_space(8.0);
    }

    fn render_training_result(&mut self, ui: &mut Ui) {
        let Some(result) = self.controller.ui.training.result.as_ref() else {
            return;
        };
        let palette = style::palette();
        Frame::new()
            .fill(style::with_alpha(palette.success, 40))
            .stroke(egui::Stroke::new(1.0, palette.success))
            .corner_radius(4.0)
            .inner_margin(Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.label(RichText::new(result.headline).strong().color(palette.success));
                ui.label(result.message_line());
                ui.label(result.note_line());
            });
    }
}
