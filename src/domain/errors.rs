use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the pre-trained artifact set at startup.
///
/// These are fatal: without a valid scaler, model and manifest the service
/// cannot produce meaningful predictions and must not start.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("artifact file not found: {path}")]
    Missing { path: PathBuf },

    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize artifact {path}: {source}")]
    Deserialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported artifact version {found} in {path} (supported: {supported})")]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("feature order mismatch: artifacts were fit with [{declared}], this build expects [{expected}]")]
    FeatureOrderMismatch { declared: String, expected: String },

    #[error("invalid scaler: {reason}")]
    InvalidScaler { reason: String },

    #[error("artifact set incompatible with this build: {reason}")]
    Incompatible { reason: String },
}

/// Per-request inference errors.
///
/// Recoverable: rendered as a failed prediction at the presentation boundary,
/// never a crash of the session.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("feature vector length mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("inference failed: {reason}")]
    Inference { reason: String },

    #[error("model produced a non-finite prediction")]
    NonFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_error_formatting() {
        let err = ArtifactLoadError::Missing {
            path: PathBuf::from("artifacts/model.json"),
        };
        assert_eq!(
            err.to_string(),
            "artifact file not found: artifacts/model.json"
        );

        let err = ArtifactLoadError::UnsupportedVersion {
            path: PathBuf::from("artifacts/scaler.json"),
            found: 7,
            supported: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("version 7"));
        assert!(msg.contains("supported: 1"));
    }

    #[test]
    fn test_prediction_error_formatting() {
        let err = PredictionError::ShapeMismatch {
            expected: 8,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 8"));
        assert!(msg.contains("got 3"));
    }
}
