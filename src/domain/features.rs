//! Fixed feature-order registry for the prediction pipeline.

/// Number of readings in one prediction request.
pub const FEATURE_COUNT: usize = 8;

/// Ordered list of feature names.
/// This order MUST match exactly the order the scaler and model were fit
/// with. The manifest shipped alongside the artifacts declares its own order
/// and is validated against this list at load time.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "temperature",
    "irradiance",
    "humidity",
    "wind_speed",
    "cloud_coverage",
    "sunshine_hours",
    "ambient_pressure",
    "panel_tilt_angle",
];

/// Declared bounds, default value and UI step for one input reading.
#[derive(Debug, Clone, Copy)]
pub struct InputSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

/// Per-input specifications, one const per reading plus `ALL` in vector order.
pub mod specs {
    use super::{FEATURE_COUNT, InputSpec};

    pub const TEMPERATURE: InputSpec = InputSpec {
        name: "temperature",
        label: "Temperature",
        unit: "°C",
        min: 0.0,
        max: 50.0,
        default: 30.0,
        step: 0.1,
    };

    pub const IRRADIANCE: InputSpec = InputSpec {
        name: "irradiance",
        label: "Irradiance",
        unit: "W/m²",
        min: 0.0,
        max: 1200.0,
        default: 850.0,
        step: 0.1,
    };

    pub const HUMIDITY: InputSpec = InputSpec {
        name: "humidity",
        label: "Humidity",
        unit: "%",
        min: 0.0,
        max: 100.0,
        default: 50.0,
        step: 0.1,
    };

    pub const WIND_SPEED: InputSpec = InputSpec {
        name: "wind_speed",
        label: "Wind Speed",
        unit: "m/s",
        min: 0.0,
        max: 20.0,
        default: 5.0,
        step: 0.1,
    };

    pub const CLOUD_COVERAGE: InputSpec = InputSpec {
        name: "cloud_coverage",
        label: "Cloud Coverage",
        unit: "%",
        min: 0.0,
        max: 100.0,
        default: 20.0,
        step: 0.1,
    };

    pub const SUNSHINE_HOURS: InputSpec = InputSpec {
        name: "sunshine_hours",
        label: "Sunshine Hours",
        unit: "h",
        min: 0.0,
        max: 12.0,
        default: 10.0,
        step: 0.1,
    };

    pub const AMBIENT_PRESSURE: InputSpec = InputSpec {
        name: "ambient_pressure",
        label: "Ambient Pressure",
        unit: "hPa",
        min: 900.0,
        max: 1100.0,
        default: 1010.0,
        step: 0.1,
    };

    pub const PANEL_TILT_ANGLE: InputSpec = InputSpec {
        name: "panel_tilt_angle",
        label: "Panel Tilt Angle",
        unit: "°",
        min: 0.0,
        max: 90.0,
        default: 30.0,
        step: 0.1,
    };

    /// All input specs, in feature vector order.
    pub const ALL: [InputSpec; FEATURE_COUNT] = [
        TEMPERATURE,
        IRRADIANCE,
        HUMIDITY,
        WIND_SPEED,
        CLOUD_COVERAGE,
        SUNSHINE_HOURS,
        AMBIENT_PRESSURE,
        PANEL_TILT_ANGLE,
    ];
}

/// The raw readings of one prediction request. Bounds are enforced at the
/// input-collection boundary, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readings {
    pub temperature: f64,
    pub irradiance: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub cloud_coverage: f64,
    pub sunshine_hours: f64,
    pub ambient_pressure: f64,
    pub panel_tilt_angle: f64,
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            temperature: specs::TEMPERATURE.default,
            irradiance: specs::IRRADIANCE.default,
            humidity: specs::HUMIDITY.default,
            wind_speed: specs::WIND_SPEED.default,
            cloud_coverage: specs::CLOUD_COVERAGE.default,
            sunshine_hours: specs::SUNSHINE_HOURS.default,
            ambient_pressure: specs::AMBIENT_PRESSURE.default,
            panel_tilt_angle: specs::PANEL_TILT_ANGLE.default,
        }
    }
}

impl Readings {
    pub fn assemble(&self) -> FeatureVector {
        FeatureVector::assemble(
            self.temperature,
            self.irradiance,
            self.humidity,
            self.wind_speed,
            self.cloud_coverage,
            self.sunshine_hours,
            self.ambient_pressure,
            self.panel_tilt_angle,
        )
    }
}

/// Fixed-order numeric encoding of one prediction request.
/// Length and order are enforced by the type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Assembles the vector in the documented feature order. Never fails;
    /// swapping two arguments is the silent-corruption case the manifest
    /// validation exists to catch at load time.
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        temperature: f64,
        irradiance: f64,
        humidity: f64,
        wind_speed: f64,
        cloud_coverage: f64,
        sunshine_hours: f64,
        ambient_pressure: f64,
        panel_tilt_angle: f64,
    ) -> Self {
        Self([
            temperature,
            irradiance,
            humidity,
            wind_speed,
            cloud_coverage,
            sunshine_hours,
            ambient_pressure,
            panel_tilt_angle,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_order() {
        let vector = FeatureVector::assemble(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0);
        assert_eq!(vector.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_default_readings_assemble_boundary_scenario() {
        let vector = Readings::default().assemble();
        assert_eq!(
            vector.as_slice(),
            &[30.0, 850.0, 50.0, 5.0, 20.0, 10.0, 1010.0, 30.0]
        );
    }

    #[test]
    fn test_specs_match_feature_names() {
        assert_eq!(specs::ALL.len(), FEATURE_NAMES.len());
        for (spec, name) in specs::ALL.iter().zip(FEATURE_NAMES.iter()) {
            assert_eq!(spec.name, *name);
        }
    }

    #[test]
    fn test_defaults_within_declared_bounds() {
        for spec in specs::ALL {
            assert!(
                spec.min <= spec.default && spec.default <= spec.max,
                "default out of bounds for {}",
                spec.name
            );
        }
    }
}
