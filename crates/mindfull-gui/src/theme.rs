//! Catppuccin flavors and Phosphor icon fonts.

use crate::settings::ThemeMode;
use egui::Color32;

pub fn flavor(mode: ThemeMode) -> catppuccin_egui::Theme {
    match mode {
        ThemeMode::Latte => catppuccin_egui::LATTE,
        ThemeMode::Frappe => catppuccin_egui::FRAPPE,
        ThemeMode::Macchiato => catppuccin_egui::MACCHIATO,
        ThemeMode::Mocha => catppuccin_egui::MOCHA,
    }
}

pub fn apply(ctx: &egui::Context, mode: ThemeMode) {
    catppuccin_egui::set_theme(ctx, flavor(mode));

    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
    ctx.set_fonts(fonts);
}

/// Colors for the constellation backdrop and memory cards.
#[derive(Debug, Clone, Copy)]
pub struct CanvasPalette {
    pub background: Color32,
    pub card_fill: Color32,
    pub card_border: Color32,
    pub card_text: Color32,
    pub card_subtext: Color32,
    pub port_idle: Color32,
    pub port_active: Color32,
    pub port_hover: Color32,
}

impl CanvasPalette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let theme = flavor(mode);
        Self {
            background: theme.crust,
            card_fill: theme.surface0,
            card_border: theme.overlay0,
            card_text: theme.text,
            card_subtext: theme.subtext0,
            port_idle: theme.overlay1,
            port_active: theme.lavender,
            port_hover: theme.green,
        }
    }
}
