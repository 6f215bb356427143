use eframe::egui;

/// Warm dark theme for the prediction app.
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    // Backgrounds
    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(18, 14, 10); // #120E0A
    pub const BG_PANEL: egui::Color32 = egui::Color32::from_rgb(18, 14, 10);
    pub const BG_CARD: egui::Color32 = egui::Color32::from_rgb(34, 27, 20); // #221B14
    pub const BG_CARD_HOVER: egui::Color32 = egui::Color32::from_rgb(42, 34, 26);
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(24, 19, 14);

    // Accents
    pub const ACCENT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(255, 140, 0); // #FF8C00 (Amber)
    pub const ACCENT_RESULT: egui::Color32 = egui::Color32::from_rgb(0, 188, 212); // #00BCD4 (Teal)

    // Status
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(255, 23, 68);
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 196, 0);

    // Text
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(250, 244, 235);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(165);
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_gray(105);

    // Borders
    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(62, 50, 38);

    // --- Metrics ---

    pub const ROUNDING_MEDIUM: f32 = 8.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    // --- Styles ---

    /// Returns the standard visual style for the application
    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_PANEL;
        visuals.extreme_bg_color = Self::BG_INPUT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);

        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.weak_bg_fill = Self::BG_CARD;
        visuals.widgets.inactive.bg_fill = Self::BG_CARD;

        visuals.widgets.hovered.bg_fill = Self::BG_CARD_HOVER;
        visuals.widgets.active.bg_fill = Self::ACCENT_PRIMARY;

        visuals.selection.bg_fill = Self::ACCENT_PRIMARY.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT_PRIMARY);

        visuals
    }

    /// Standard card styling
    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING_MEDIUM)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    /// Application main layout frame
    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_WINDOW)
            .inner_margin(egui::Margin::same(Self::SPACING_LARGE as i8))
    }
}
