use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// A card container with standard styling. `highlight` draws the accent
/// border and glow used for the result card.
pub struct Card {
    title: Option<String>,
    highlight: bool,
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

impl Card {
    pub fn new() -> Self {
        Self {
            title: None,
            highlight: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn show<R>(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        let mut frame = DesignSystem::card_frame();

        if self.highlight {
            frame = frame
                .stroke(egui::Stroke::new(1.5, DesignSystem::ACCENT_RESULT))
                .shadow(egui::epaint::Shadow {
                    offset: [0, 4],
                    blur: 15,
                    spread: 0,
                    color: DesignSystem::ACCENT_RESULT.linear_multiply(0.15),
                });
        }

        frame.show(ui, |ui| {
            if let Some(title) = self.title {
                ui.label(
                    egui::RichText::new(title)
                        .size(12.0)
                        .color(DesignSystem::TEXT_SECONDARY)
                        .strong(),
                );
                ui.add_space(DesignSystem::SPACING_SMALL);
            }

            add_contents(ui)
        })
    }
}
