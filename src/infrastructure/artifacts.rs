//! Versioned, serde_json-backed artifact formats and the startup loader.
//!
//! The artifact set is three files: a manifest declaring the feature order
//! the pipeline was fit with, a z-score scaler and a regression model. All
//! three are read once at startup and never reloaded; swapping a model means
//! restarting the process.

use crate::config::ArtifactPaths;
use crate::domain::errors::{ArtifactLoadError, PredictionError};
use crate::domain::features::{FEATURE_NAMES, Readings};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// The single artifact format version this build reads and writes.
pub const ARTIFACT_VERSION: u32 = 1;

/// Describes what the scaler and model were fit with. Validated against the
/// compiled-in feature registry at load time so that a reordered or resized
/// artifact set fails at startup instead of silently predicting garbage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub version: u32,
    pub feature_names: Vec<String>,
    pub target: String,
    pub target_unit: String,
}

/// Z-score feature scaler: `(x - mean) / scale` per column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub version: u32,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl ScalerArtifact {
    /// Number of features the scaler was fit with.
    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// Applies the deterministic z-score transform.
    pub fn transform(&self, input: &[f64]) -> Result<Vec<f64>, PredictionError> {
        if input.len() != self.mean.len() {
            return Err(PredictionError::ShapeMismatch {
                expected: self.mean.len(),
                actual: input.len(),
            });
        }
        Ok(input
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

/// The serialized regression model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    #[serde(flatten)]
    pub kind: ModelKind,
}

/// Supported model families. `RandomForest` carries a smartcore regressor in
/// its serde_json form; `Linear` is a plain coefficient vector, mostly useful
/// for hand-written stub artifacts and tests.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    RandomForest {
        forest: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
    },
}

impl ModelArtifact {
    /// Runs inference on an already-scaled vector, yielding one scalar.
    pub fn predict(&self, scaled: &[f64]) -> Result<f64, PredictionError> {
        match &self.kind {
            ModelKind::Linear {
                coefficients,
                intercept,
            } => {
                if scaled.len() != coefficients.len() {
                    return Err(PredictionError::ShapeMismatch {
                        expected: coefficients.len(),
                        actual: scaled.len(),
                    });
                }
                let dot: f64 = scaled.iter().zip(coefficients.iter()).map(|(x, c)| x * c).sum();
                Ok(dot + intercept)
            }
            ModelKind::RandomForest { forest } => {
                let matrix = DenseMatrix::from_2d_vec(&vec![scaled.to_vec()]).map_err(|e| {
                    PredictionError::Inference {
                        reason: e.to_string(),
                    }
                })?;
                let predictions = forest.predict(&matrix).map_err(|e| PredictionError::Inference {
                    reason: e.to_string(),
                })?;
                predictions
                    .first()
                    .copied()
                    .ok_or_else(|| PredictionError::Inference {
                        reason: "no prediction returned".to_string(),
                    })
            }
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ModelKind::Linear { .. } => "linear",
            ModelKind::RandomForest { .. } => "random_forest",
        }
    }
}

/// Read-only holder of the loaded artifact set. Constructed once at process
/// start and shared untouched for the process lifetime.
#[derive(Debug)]
pub struct ArtifactStore {
    manifest: ArtifactManifest,
    scaler: ScalerArtifact,
    model: ModelArtifact,
}

impl ArtifactStore {
    /// Loads and validates the artifact set. Any failure here is fatal to
    /// startup: the service must not come up without a coherent pipeline.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        let manifest: ArtifactManifest = read_json(&paths.manifest)?;
        check_version(manifest.version, &paths.manifest)?;

        let scaler: ScalerArtifact = read_json(&paths.scaler)?;
        check_version(scaler.version, &paths.scaler)?;

        let model: ModelArtifact = read_json(&paths.model)?;
        check_version(model.version, &paths.model)?;

        let store = Self::from_parts(manifest, scaler, model)?;

        info!(
            "Loaded artifact set: {} model, {} features, target '{}' ({})",
            store.model.kind_name(),
            store.manifest.feature_names.len(),
            store.manifest.target,
            store.manifest.target_unit,
        );
        Ok(store)
    }

    /// Builds a store from already-deserialized artifacts, running the same
    /// coherence checks as [`ArtifactStore::load`]: feature order, scaler
    /// width and a probe inference.
    pub fn from_parts(
        manifest: ArtifactManifest,
        scaler: ScalerArtifact,
        model: ModelArtifact,
    ) -> Result<Self, ArtifactLoadError> {
        validate_feature_order(&manifest)?;
        validate_scaler(&scaler, manifest.feature_names.len())?;

        let store = Self {
            manifest,
            scaler,
            model,
        };
        store.probe()?;
        Ok(store)
    }

    /// One inference on the default readings. Catches a model fit on a
    /// different feature count than the manifest claims, which the manifest
    /// checks alone cannot see.
    fn probe(&self) -> Result<(), ArtifactLoadError> {
        let vector = Readings::default().assemble();
        let scaled = self
            .scaler
            .transform(vector.as_slice())
            .map_err(|e| ArtifactLoadError::Incompatible {
                reason: e.to_string(),
            })?;
        self.model
            .predict(&scaled)
            .map_err(|e| ArtifactLoadError::Incompatible {
                reason: e.to_string(),
            })?;
        Ok(())
    }

    pub fn manifest(&self) -> &ArtifactManifest {
        &self.manifest
    }

    pub fn scaler(&self) -> &ScalerArtifact {
        &self.scaler
    }

    pub fn model(&self) -> &ModelArtifact {
        &self.model
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactLoadError> {
    if !path.exists() {
        return Err(ArtifactLoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactLoadError::Deserialize {
        path: path.to_path_buf(),
        source,
    })
}

fn check_version(found: u32, path: &Path) -> Result<(), ArtifactLoadError> {
    if found != ARTIFACT_VERSION {
        return Err(ArtifactLoadError::UnsupportedVersion {
            path: path.to_path_buf(),
            found,
            supported: ARTIFACT_VERSION,
        });
    }
    Ok(())
}

fn validate_feature_order(manifest: &ArtifactManifest) -> Result<(), ArtifactLoadError> {
    let declared: Vec<&str> = manifest.feature_names.iter().map(String::as_str).collect();
    if declared != FEATURE_NAMES {
        return Err(ArtifactLoadError::FeatureOrderMismatch {
            declared: declared.join(", "),
            expected: FEATURE_NAMES.join(", "),
        });
    }
    Ok(())
}

fn validate_scaler(scaler: &ScalerArtifact, feature_count: usize) -> Result<(), ArtifactLoadError> {
    if scaler.mean.len() != feature_count || scaler.scale.len() != feature_count {
        return Err(ArtifactLoadError::InvalidScaler {
            reason: format!(
                "expected {} mean/scale entries, got {}/{}",
                feature_count,
                scaler.mean.len(),
                scaler.scale.len()
            ),
        });
    }
    if scaler.mean.iter().any(|m| !m.is_finite()) {
        return Err(ArtifactLoadError::InvalidScaler {
            reason: "non-finite mean entry".to_string(),
        });
    }
    if scaler.scale.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(ArtifactLoadError::InvalidScaler {
            reason: "scale entries must be finite and positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::features::FEATURE_COUNT;

    fn stub_scaler() -> ScalerArtifact {
        ScalerArtifact {
            version: ARTIFACT_VERSION,
            mean: vec![10.0; FEATURE_COUNT],
            scale: vec![2.0; FEATURE_COUNT],
        }
    }

    #[test]
    fn test_scaler_transform() {
        let scaler = stub_scaler();
        let scaled = scaler.transform(&[12.0; FEATURE_COUNT]).unwrap();
        assert_eq!(scaled, vec![1.0; FEATURE_COUNT]);
    }

    #[test]
    fn test_scaler_rejects_wrong_length() {
        let scaler = stub_scaler();
        let err = scaler.transform(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::ShapeMismatch {
                expected: FEATURE_COUNT,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_linear_model_predict() {
        let model = ModelArtifact {
            version: ARTIFACT_VERSION,
            kind: ModelKind::Linear {
                coefficients: vec![1.0, -1.0],
                intercept: 0.5,
            },
        };
        assert_eq!(model.predict(&[2.0, 1.0]).unwrap(), 1.5);
    }

    #[test]
    fn test_linear_model_rejects_wrong_length() {
        let model = ModelArtifact {
            version: ARTIFACT_VERSION,
            kind: ModelKind::Linear {
                coefficients: vec![1.0, -1.0],
                intercept: 0.0,
            },
        };
        let err = model.predict(&[1.0]).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_model_artifact_json_shape() {
        let json = r#"{
            "version": 1,
            "kind": "linear",
            "coefficients": [0.1, 0.2],
            "intercept": 1.0
        }"#;
        let model: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(model.version, 1);
        assert_eq!(model.kind_name(), "linear");
    }

    #[test]
    fn test_manifest_feature_order_mismatch() {
        let mut names: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        names.swap(0, 1);
        let manifest = ArtifactManifest {
            version: ARTIFACT_VERSION,
            feature_names: names,
            target: "power".to_string(),
            target_unit: "kW".to_string(),
        };
        let err = validate_feature_order(&manifest).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::FeatureOrderMismatch { .. }));
    }

    #[test]
    fn test_scaler_validation_rejects_zero_scale() {
        let mut scaler = stub_scaler();
        scaler.scale[3] = 0.0;
        let err = validate_scaler(&scaler, FEATURE_COUNT).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::InvalidScaler { .. }));
    }
}
