use crate::domain::errors::PredictionError;
use crate::domain::features::FeatureVector;
use crate::domain::power::PredictedPower;
use crate::infrastructure::artifacts::{ArtifactManifest, ArtifactStore};
use std::sync::Arc;
use tracing::debug;

/// Turns a feature vector into a predicted power value using the loaded
/// artifact set: scaler transform first, then model inference.
///
/// Stateless and deterministic for a fixed artifact set. Cheap to clone the
/// `Arc` behind it; concurrent sessions can share one instance since the
/// artifacts are never mutated after load.
pub struct PredictionService {
    artifacts: Arc<ArtifactStore>,
}

impl PredictionService {
    pub fn new(artifacts: Arc<ArtifactStore>) -> Self {
        Self { artifacts }
    }

    /// Synchronous, in-process inference. Shape mismatches at the scaler or
    /// model seam surface as a recoverable [`PredictionError`].
    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictedPower, PredictionError> {
        let scaled = self.artifacts.scaler().transform(vector.as_slice())?;
        let raw = self.artifacts.model().predict(&scaled)?;
        if !raw.is_finite() {
            return Err(PredictionError::NonFinite);
        }
        debug!("Inference produced {raw:.4} kW");
        Ok(PredictedPower::from_kilowatts(raw))
    }

    pub fn manifest(&self) -> &ArtifactManifest {
        self.artifacts.manifest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::{FEATURE_COUNT, FEATURE_NAMES, Readings};
    use crate::infrastructure::artifacts::{
        ARTIFACT_VERSION, ModelArtifact, ModelKind, ScalerArtifact,
    };

    fn stub_service(coefficients: Vec<f64>, intercept: f64) -> PredictionService {
        let manifest = ArtifactManifest {
            version: ARTIFACT_VERSION,
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            target: "power_output".to_string(),
            target_unit: "kW".to_string(),
        };
        let scaler = ScalerArtifact {
            version: ARTIFACT_VERSION,
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        };
        let model = ModelArtifact {
            version: ARTIFACT_VERSION,
            kind: ModelKind::Linear {
                coefficients,
                intercept,
            },
        };
        let store = ArtifactStore::from_parts(manifest, scaler, model).unwrap();
        PredictionService::new(Arc::new(store))
    }

    #[test]
    fn test_predict_is_deterministic() {
        let service = stub_service(vec![0.001; FEATURE_COUNT], 1.0);
        let vector = Readings::default().assemble();

        let first = service.predict(&vector).unwrap();
        let second = service.predict(&vector).unwrap();
        assert_eq!(first.kilowatts(), second.kilowatts());
    }

    #[test]
    fn test_predict_default_readings_through_identity_scaler() {
        // Identity scaler, unit coefficient on temperature only: the
        // prediction is the raw temperature reading plus the intercept.
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = 1.0;
        let service = stub_service(coefficients, 2.0);

        let power = service.predict(&Readings::default().assemble()).unwrap();
        assert_eq!(power.kilowatts(), 32.0);
        assert_eq!(power.to_string(), "32.00 kW");
    }

    #[test]
    fn test_non_finite_prediction_is_an_error() {
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[0] = f64::INFINITY;
        let service = stub_service(coefficients, 0.0);

        let err = service.predict(&Readings::default().assemble()).unwrap_err();
        assert!(matches!(err, PredictionError::NonFinite));
    }
}
