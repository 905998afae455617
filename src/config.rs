//! Declarative description of a geodesic sphere, loadable from a RON file.
//!
//! ```ron
//! (
//!     levels: 3,
//!     seed_radius: Some(1.0),
//!     projection: FixedRadius(1.0),
//!     midpoints: Shared,
//! )
//! ```
//!
//! Every field is optional and falls back to `SphereConfig::default()`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    error::GeodesicResult,
    geodesic_polyhedron::{refine, MidpointSharing, Projection, RefineParams},
    icosahedron::{icosahedron, icosahedron_with_radius},
    mesh::Mesh,
};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sphere config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid sphere config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(details: impl Into<String>) -> Self {
        Self::Invalid(details.into())
    }
}

/// Everything needed to build a sphere: the seed, how often to refine it and where new
/// vertices go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Number of subdivision passes applied to the seed icosahedron.
    pub levels: u32,
    /// Radius the seed is projected onto before refining. `None` keeps the golden rectangle
    /// coordinates.
    pub seed_radius: Option<f64>,
    pub projection: Projection,
    pub midpoints: MidpointSharing,
    pub max_faces: usize,
}

impl Default for SphereConfig {
    fn default() -> Self {
        let params = RefineParams::default();
        Self {
            levels: 0,
            seed_radius: Some(1.),
            projection: Projection::FixedRadius(1.),
            midpoints: params.midpoints,
            max_faces: params.max_faces,
        }
    }
}

impl SphereConfig {
    pub fn from_ron_str(text: &str) -> ConfigResult<Self> {
        let config: SphereConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded sphere config from {}", path.display());
        Self::from_ron_str(&text)
    }

    // Rejects values that can only fail later, so a bad file is reported at load time.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(radius) = self.seed_radius {
            if !(radius.is_finite() && radius > 0.) {
                return Err(ConfigError::invalid(format!(
                    "seed_radius must be finite and positive, got {}",
                    radius
                )));
            }
        }
        if let Projection::FixedRadius(radius) = self.projection {
            if !(radius.is_finite() && radius > 0.) {
                return Err(ConfigError::invalid(format!(
                    "projection radius must be finite and positive, got {}",
                    radius
                )));
            }
        }
        if self.max_faces == 0 {
            return Err(ConfigError::invalid("max_faces must be at least 1"));
        }
        Ok(())
    }

    pub fn refine_params(&self) -> RefineParams {
        RefineParams::from(self.projection)
            .with_midpoints(self.midpoints)
            .with_max_faces(self.max_faces)
    }

    pub fn build(&self) -> GeodesicResult<Mesh> {
        let seed = match self.seed_radius {
            Some(radius) => icosahedron_with_radius(radius)?,
            None => icosahedron(),
        };
        refine(seed, self.levels, &self.refine_params())
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::{ConfigError, SphereConfig};
    use crate::geodesic_polyhedron::{MidpointSharing, Projection};

    #[test]
    fn parses_full_config() {
        let config = SphereConfig::from_ron_str(
            "(levels: 3, seed_radius: Some(2.0), projection: FixedRadius(2.0), \
             midpoints: PerFace, max_faces: 5000)",
        )
        .unwrap();
        assert_eq!(
            config,
            SphereConfig {
                levels: 3,
                seed_radius: Some(2.),
                projection: Projection::FixedRadius(2.),
                midpoints: MidpointSharing::PerFace,
                max_faces: 5000,
            }
        );
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = SphereConfig::from_ron_str("(levels: 2)").unwrap();
        assert_eq!(
            config,
            SphereConfig {
                levels: 2,
                ..SphereConfig::default()
            }
        );

        let config = SphereConfig::from_ron_str("(projection: InheritRadius)").unwrap();
        assert_eq!(config.projection, Projection::InheritRadius);
        assert_eq!(config.levels, 0);
    }

    #[test]
    fn rejects_bad_values() {
        let err = SphereConfig::from_ron_str("(seed_radius: Some(-1.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SphereConfig::from_ron_str("(projection: FixedRadius(0.0))").unwrap_err();
        assert!(format!("{}", err).contains("projection radius"));

        let err = SphereConfig::from_ron_str("(max_faces: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_text() {
        let err = SphereConfig::from_ron_str("(levels: \"three\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file() {
        let err = SphereConfig::load("/nonexistent/sphere.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn default_builds_unit_icosahedron() {
        let mesh = SphereConfig::default().build().unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 20);
        for v in mesh.vertices() {
            assert_relative_eq!(v.magnitude(), 1., epsilon = 1e-12);
        }
    }

    #[test]
    fn builds_refined_sphere() {
        let config = SphereConfig {
            levels: 2,
            projection: Projection::FixedRadius(1.),
            ..SphereConfig::default()
        };
        let mesh = config.build().unwrap();
        assert_eq!(mesh.face_count(), 320);
        assert_eq!(mesh.vertex_count(), 162);
    }
}
