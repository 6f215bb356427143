use crate::application::predictor::PredictionService;
use crate::domain::errors::PredictionError;
use crate::domain::features::{InputSpec, Readings, specs};
use crate::domain::power::PredictedPower;
use crate::interfaces::components::card::Card;
use crate::interfaces::design_system::DesignSystem;
use crossbeam_channel::Receiver;
use eframe::egui;
use std::sync::Arc;
use tracing::{error, info};

const MAX_ACTIVITY_LINES: usize = 200;

/// The interactive shell: collects the eight bounded readings, runs one
/// prediction per button press and renders the result or the failure.
pub struct PredictApp {
    service: Arc<PredictionService>,
    readings: Readings,
    outcome: Option<Result<PredictedPower, PredictionError>>,

    // Activity feed fed by the tracing channel writer
    log_rx: Receiver<String>,
    activity: Vec<String>,
    show_activity: bool,
}

impl PredictApp {
    pub fn new(service: Arc<PredictionService>, log_rx: Receiver<String>) -> Self {
        Self {
            service,
            readings: Readings::default(),
            outcome: None,
            log_rx,
            activity: Vec::new(),
            show_activity: false,
        }
    }

    fn drain_logs(&mut self) {
        while let Ok(line) = self.log_rx.try_recv() {
            self.activity.push(line.trim_end().to_string());
        }
        if self.activity.len() > MAX_ACTIVITY_LINES {
            let excess = self.activity.len() - MAX_ACTIVITY_LINES;
            self.activity.drain(0..excess);
        }
    }

    fn run_prediction(&mut self) {
        let vector = self.readings.assemble();
        match self.service.predict(&vector) {
            Ok(power) => {
                info!("Predicted solar power output: {power}");
                self.outcome = Some(Ok(power));
            }
            Err(e) => {
                error!("Prediction failed: {e}");
                self.outcome = Some(Err(e));
            }
        }
    }

    fn reading_slider(ui: &mut egui::Ui, spec: &InputSpec, value: &mut f64) {
        ui.label(
            egui::RichText::new(format!("{} ({})", spec.label, spec.unit))
                .color(DesignSystem::TEXT_SECONDARY)
                .size(13.0),
        );
        ui.add(
            egui::Slider::new(value, spec.min..=spec.max)
                .step_by(spec.step)
                .suffix(format!(" {}", spec.unit)),
        );
        ui.add_space(DesignSystem::SPACING_SMALL);
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        Card::new().title("READINGS").show(ui, |ui| {
            ui.spacing_mut().slider_width = 260.0;

            Self::reading_slider(ui, &specs::TEMPERATURE, &mut self.readings.temperature);
            Self::reading_slider(ui, &specs::HUMIDITY, &mut self.readings.humidity);
            Self::reading_slider(ui, &specs::CLOUD_COVERAGE, &mut self.readings.cloud_coverage);
            Self::reading_slider(
                ui,
                &specs::AMBIENT_PRESSURE,
                &mut self.readings.ambient_pressure,
            );
            Self::reading_slider(ui, &specs::IRRADIANCE, &mut self.readings.irradiance);
            Self::reading_slider(ui, &specs::WIND_SPEED, &mut self.readings.wind_speed);
            Self::reading_slider(ui, &specs::SUNSHINE_HOURS, &mut self.readings.sunshine_hours);
            Self::reading_slider(
                ui,
                &specs::PANEL_TILT_ANGLE,
                &mut self.readings.panel_tilt_angle,
            );
        });

        ui.add_space(DesignSystem::SPACING_MEDIUM);

        ui.horizontal(|ui| {
            let predict = egui::Button::new(
                egui::RichText::new("⚡ Predict")
                    .strong()
                    .color(DesignSystem::TEXT_PRIMARY),
            )
            .fill(DesignSystem::ACCENT_PRIMARY.linear_multiply(0.35));

            if ui.add(predict).clicked() {
                self.run_prediction();
            }

            if ui.button("Reset").clicked() {
                self.readings = Readings::default();
                self.outcome = None;
            }
        });
    }

    fn render_outcome(&self, ui: &mut egui::Ui) {
        let Some(outcome) = &self.outcome else {
            return;
        };

        ui.add_space(DesignSystem::SPACING_MEDIUM);
        match outcome {
            Ok(power) => {
                Card::new()
                    .title("PREDICTED POWER OUTPUT")
                    .highlight(true)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(power.to_string())
                                .size(34.0)
                                .strong()
                                .color(DesignSystem::ACCENT_RESULT),
                        );
                    });
            }
            Err(e) => {
                Card::new().title("PREDICTION FAILED").show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(e.to_string())
                            .color(DesignSystem::DANGER)
                            .size(14.0),
                    );
                });
            }
        }
    }

    fn render_activity(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, true])
            .max_height(140.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.activity {
                    let color = if line.contains("ERROR") {
                        DesignSystem::DANGER
                    } else if line.contains("WARN") {
                        DesignSystem::WARNING
                    } else {
                        DesignSystem::TEXT_MUTED
                    };
                    ui.label(egui::RichText::new(line).monospace().size(11.0).color(color));
                }
            });
    }
}

impl eframe::App for PredictApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());
        self.drain_logs();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(
                    egui::RichText::new("🔆 Solar Power Prediction")
                        .color(DesignSystem::ACCENT_PRIMARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let manifest = self.service.manifest();
                    ui.label(
                        egui::RichText::new(format!(
                            "{} → {}",
                            manifest.target, manifest.target_unit
                        ))
                        .color(DesignSystem::TEXT_MUTED)
                        .small(),
                    );
                });
            });
        });

        if self.show_activity {
            egui::TopBottomPanel::bottom("activity")
                .resizable(false)
                .show(ctx, |ui| {
                    self.render_activity(ui);
                });
        }

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(
                            "Enter environmental and system details below to predict \
                             solar power output in kW.",
                        )
                        .color(DesignSystem::TEXT_SECONDARY),
                    );
                    ui.add_space(DesignSystem::SPACING_MEDIUM);

                    self.render_form(ui);
                    self.render_outcome(ui);

                    ui.add_space(DesignSystem::SPACING_LARGE);
                    ui.checkbox(&mut self.show_activity, "Show activity log");
                });
            });
    }
}
