//! Configuration for solarcast.
//!
//! Artifact locations come from environment variables with sensible defaults;
//! a `.env` file is honored when present (loaded in `main`).

use std::env;
use std::path::PathBuf;

pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Filesystem locations of the three artifact files.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub manifest: PathBuf,
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside one artifact directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            manifest: dir.join("manifest.json"),
            scaler: dir.join("scaler.json"),
            model: dir.join("model.json"),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub artifacts: ArtifactPaths,
}

impl Config {
    pub fn from_env() -> Self {
        let dir = env::var("SOLARCAST_ARTIFACT_DIR")
            .unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string());
        let defaults = ArtifactPaths::in_dir(dir);

        Self {
            artifacts: ArtifactPaths {
                manifest: path_from_env("SOLARCAST_MANIFEST_PATH", defaults.manifest),
                scaler: path_from_env("SOLARCAST_SCALER_PATH", defaults.scaler),
                model: path_from_env("SOLARCAST_MODEL_PATH", defaults.model),
            },
        }
    }
}

fn path_from_env(var: &str, default: PathBuf) -> PathBuf {
    env::var(var).map(PathBuf::from).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths_in_dir() {
        let paths = ArtifactPaths::in_dir("artifacts");
        assert_eq!(paths.manifest, PathBuf::from("artifacts/manifest.json"));
        assert_eq!(paths.scaler, PathBuf::from("artifacts/scaler.json"));
        assert_eq!(paths.model, PathBuf::from("artifacts/model.json"));
    }
}
