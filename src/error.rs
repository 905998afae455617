use thiserror::Error;

use crate::mesh::Face;

pub type GeodesicResult<T> = Result<T, GeodesicError>;

// Every error leaves the mesh it was raised for untouched.
#[derive(Debug, Error, PartialEq)]
pub enum GeodesicError {
    // Direction is undefined for a vertex at the origin, so it cannot be projected.
    #[error("vertex {index} has zero length and cannot be projected")]
    DegenerateVertex { index: usize },

    #[error("face {face} {indices:?} is invalid for a mesh with {vertex_count} vertices")]
    InvalidFaceIndex {
        face: usize,
        indices: Face,
        vertex_count: usize,
    },

    #[error("midpoint of edge ({a}, {b}) has zero length and cannot be projected")]
    DegenerateMidpoint { a: u32, b: u32 },

    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f64),

    #[error("vertex spacing must be finite and positive, got {0}")]
    InvalidSpacing(f64),

    #[error("refinement would grow {current} faces to {projected}, limit is {max}")]
    MeshTooLarge {
        current: usize,
        projected: usize,
        max: usize,
    },
}

impl GeodesicError {
    pub fn invalid_face(face: usize, indices: Face, vertex_count: usize) -> Self {
        Self::InvalidFaceIndex {
            face,
            indices,
            vertex_count,
        }
    }

    pub fn too_large(current: usize, projected: usize, max: usize) -> Self {
        Self::MeshTooLarge {
            current,
            projected,
            max,
        }
    }
}

// Radii are only meaningful when finite and strictly positive.
pub(crate) fn check_radius(radius: f64) -> GeodesicResult<f64> {
    if radius.is_finite() && radius > 0. {
        Ok(radius)
    } else {
        Err(GeodesicError::InvalidRadius(radius))
    }
}

pub(crate) fn check_spacing(dist: f64) -> GeodesicResult<f64> {
    if dist.is_finite() && dist > 0. {
        Ok(dist)
    } else {
        Err(GeodesicError::InvalidSpacing(dist))
    }
}
