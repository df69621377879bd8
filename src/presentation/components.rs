use eframe::egui;

pub struct Components;

impl Components {
    pub fn heading(ui: &mut egui::Ui, text: &str) {
        ui.label(egui::RichText::new(text).heading().strong());
    }

    pub fn brutalist_card<R>(
        ui: &mut egui::Ui,
        title: &str,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> R {
        let stroke = ui.style().visuals.widgets.noninteractive.bg_stroke;
        let bg = ui.style().visuals.widgets.noninteractive.bg_fill;

        egui::Frame::none()
            .inner_margin(egui::Margin::same(15.0))
            .stroke(stroke)
            .fill(bg)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(title).strong().size(18.0));
                    ui.add_space(8.0);
                    add_contents(ui)
                })
                .inner
            })
            .inner
    }

    pub fn status_banner(
        ui: &mut egui::Ui,
        text: &str,
        bg_color: egui::Color32,
        text_color: egui::Color32,
    ) {
        ui.add_sized(
            [ui.available_width(), 35.0],
            egui::Label::new(
                egui::RichText::new(text)
                    .color(text_color)
                    .background_color(bg_color)
                    .size(16.0)
                    .strong(),
            )
            .wrap_mode(egui::TextWrapMode::Extend),
        );
    }

    /// On/off switch; returns a response that is `changed()` when flipped
    pub fn toggle_switch(ui: &mut egui::Ui, on: &mut bool, enabled: bool) -> egui::Response {
        let desired_size = ui.spacing().interact_size.y * egui::vec2(2.2, 1.1);
        let sense = if enabled {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };
        let (rect, mut response) = ui.allocate_exact_size(desired_size, sense);

        if response.clicked() {
            *on = !*on;
            response.mark_changed();
        }

        if ui.is_rect_visible(rect) {
            let visuals = ui.style().interact_selectable(&response, *on);
            let stroke = ui.style().visuals.widgets.noninteractive.bg_stroke;
            let fill = if *on {
                ui.style().visuals.selection.bg_fill
            } else {
                visuals.bg_fill
            };
            ui.painter().rect(rect, egui::Rounding::ZERO, fill, stroke);

            let knob_width = rect.height();
            let knob_x = if *on {
                rect.right() - knob_width
            } else {
                rect.left()
            };
            let knob = egui::Rect::from_min_size(
                egui::pos2(knob_x, rect.top()),
                egui::vec2(knob_width, rect.height()),
            )
            .shrink(3.0);
            ui.painter()
                .rect(knob, egui::Rounding::ZERO, stroke.color, egui::Stroke::NONE);
        }

        response
    }
}
