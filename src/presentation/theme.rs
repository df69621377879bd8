use crate::domain::models::{AdapterState, AdvertisingState, MessageSeverity};
use eframe::egui;

pub struct Palette {
    pub bg: egui::Color32,
    pub fg: egui::Color32,
    pub stroke: egui::Color32,
    pub hover: egui::Color32,
    pub pressed: egui::Color32,
    pub selection: egui::Color32,
    pub ok: egui::Color32,
    pub warn: egui::Color32,
    pub bad: egui::Color32,
    pub info: egui::Color32,
}

impl Palette {
    pub fn new(is_dark: bool) -> Self {
        if is_dark {
            Self {
                bg: egui::Color32::from_rgb(22, 24, 28),
                fg: egui::Color32::from_rgb(235, 235, 235),
                stroke: egui::Color32::from_rgb(235, 235, 235),
                hover: egui::Color32::from_rgb(0, 170, 255),
                pressed: egui::Color32::from_rgb(0, 230, 160),
                selection: egui::Color32::from_rgb(0, 120, 215),
                ok: egui::Color32::from_rgb(0, 220, 120),
                warn: egui::Color32::from_rgb(255, 190, 0),
                bad: egui::Color32::from_rgb(255, 85, 85),
                info: egui::Color32::from_rgb(110, 170, 255),
            }
        } else {
            Self {
                bg: egui::Color32::from_rgb(242, 246, 250),
                fg: egui::Color32::BLACK,
                stroke: egui::Color32::BLACK,
                hover: egui::Color32::from_rgb(120, 200, 255),
                pressed: egui::Color32::from_rgb(0, 210, 140),
                selection: egui::Color32::from_rgb(0, 150, 255),
                ok: egui::Color32::from_rgb(0, 170, 80),
                warn: egui::Color32::from_rgb(220, 150, 0),
                bad: egui::Color32::from_rgb(220, 40, 40),
                info: egui::Color32::from_rgb(30, 90, 220),
            }
        }
    }

    pub fn severity(&self, severity: MessageSeverity) -> egui::Color32 {
        match severity {
            MessageSeverity::Info => self.info,
            MessageSeverity::Success => self.ok,
            MessageSeverity::Warning => self.warn,
            MessageSeverity::Error => self.bad,
        }
    }

    /// Banner text and background for the adapter and advertising state
    pub fn radio_banner(
        &self,
        adapter: AdapterState,
        advertising: AdvertisingState,
    ) -> (&'static str, egui::Color32) {
        match (adapter, advertising) {
            (AdapterState::Unavailable, _) => ("NO BLUETOOTH ADAPTER", egui::Color32::from_gray(110)),
            (AdapterState::Off, _) => ("BLUETOOTH OFF", self.bad),
            (AdapterState::On, AdvertisingState::Active) => ("ADVERTISING", self.ok),
            (AdapterState::On, AdvertisingState::Starting) => ("STARTING...", self.warn),
            (AdapterState::On, AdvertisingState::Idle) => ("BLUETOOTH ON", self.info),
        }
    }
}

pub fn configure_theme(ctx: &egui::Context, is_dark: bool) {
    let mut style = (*ctx.style()).clone();
    let palette = Palette::new(is_dark);

    style
        .text_styles
        .iter_mut()
        .for_each(|(text_style, font_id)| {
            font_id.size = match text_style {
                egui::TextStyle::Heading => 26.0,
                egui::TextStyle::Body | egui::TextStyle::Button => 15.0,
                egui::TextStyle::Monospace => 14.0,
                _ => font_id.size,
            };
        });

    style.spacing.item_spacing = egui::vec2(10.0, 10.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);

    let widgets = &mut style.visuals.widgets;
    for (visuals, width) in [
        (&mut widgets.noninteractive, 2.0),
        (&mut widgets.inactive, 2.0),
        (&mut widgets.hovered, 2.5),
        (&mut widgets.active, 3.0),
    ] {
        visuals.bg_stroke = egui::Stroke::new(width, palette.stroke);
        visuals.rounding = egui::Rounding::ZERO;
        visuals.fg_stroke = egui::Stroke::new(1.0, palette.fg);
    }
    widgets.noninteractive.bg_fill = palette.bg;
    widgets.inactive.bg_fill = if is_dark {
        egui::Color32::from_gray(36)
    } else {
        egui::Color32::WHITE
    };
    widgets.hovered.bg_fill = palette.hover;
    widgets.hovered.fg_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);
    widgets.hovered.expansion = 1.5;
    widgets.active.bg_fill = palette.pressed;
    widgets.active.fg_stroke = egui::Stroke::new(1.0, egui::Color32::BLACK);

    style.visuals.selection.stroke = egui::Stroke::new(1.0, palette.stroke);
    style.visuals.selection.bg_fill = palette.selection;

    style.visuals.window_rounding = egui::Rounding::ZERO;
    style.visuals.window_stroke = egui::Stroke::new(2.0, palette.stroke);
    style.visuals.window_shadow = egui::Shadow {
        offset: egui::vec2(6.0, 6.0),
        blur: 0.0,
        spread: 0.0,
        color: palette.stroke,
    };
    style.visuals.window_fill = palette.bg;
    style.visuals.panel_fill = palette.bg;
    style.visuals.override_text_color = Some(palette.fg);

    ctx.set_style(style);
}
