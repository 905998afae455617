use nalgebra::Vector3;

use crate::{
    error::GeodesicResult,
    geodesic_polyhedron::project_in_place,
    mesh::{Face, Mesh},
};

// (1+sqrt(5))/2
pub const GOLDEN_RATIO: f64 = 1.6180339887498948482045868343656381177;

const φ: f64 = GOLDEN_RATIO;

// Every edge of the seed icosahedron has this length.
pub const EDGE_LENGTH: f64 = 2.;

// Distance of each seed vertex from the origin, sqrt(φ^2+1). Remember that φ^2 = φ+1.
pub fn circumradius() -> f64 {
    (φ + 2.).sqrt()
}

// The corners of three mutually orthogonal golden rectangles with sides 2 and 2φ.
// Index order matters, the face table below refers to it.
const initial_verts: [Vector3<f64>; 12] = [
    // x = 0
    Vector3::new(0., φ, -1.),
    Vector3::new(0., φ, 1.),
    Vector3::new(0., -φ, 1.),
    Vector3::new(0., -φ, -1.),
    // z = 0
    Vector3::new(-φ, 1., 0.),
    Vector3::new(φ, 1., 0.),
    Vector3::new(φ, -1., 0.),
    Vector3::new(-φ, -1., 0.),
    // y = 0
    Vector3::new(-1., 0., -φ),
    Vector3::new(-1., 0., φ),
    Vector3::new(1., 0., φ),
    Vector3::new(1., 0., -φ),
];

// Triangles oriented in widdershins (counter-clockwise) order seen from outside.
#[rustfmt::skip]
const initial_tris: [Face; 20] = [
    // Fan around vertex 0
    (4, 1, 0), (8, 4, 0), (11, 8, 0), (5, 11, 0), (1, 5, 0),
    // Belt, upper half
    (4, 9, 1), (8, 7, 4), (11, 3, 8), (5, 6, 11), (1, 10, 5),
    // Fan around vertex 2
    (3, 6, 2), (7, 3, 2), (9, 7, 2), (10, 9, 2), (6, 10, 2),
    // Belt, lower half
    (3, 11, 6), (7, 8, 3), (9, 4, 7), (10, 1, 9), (6, 5, 10),
];

/// The regular icosahedron centred on the origin, with edge length 2.
///
/// 12 vertices of degree 5, 20 equilateral faces and 30 edges. This is the seed mesh that
/// refinement turns into a geodesic sphere.
pub fn icosahedron() -> Mesh {
    Mesh::from_parts_unchecked(initial_verts.to_vec(), initial_tris.to_vec())
}

// The seed icosahedron with every vertex moved onto the sphere of the given radius.
pub fn icosahedron_with_radius(radius: f64) -> GeodesicResult<Mesh> {
    let mut mesh = icosahedron();
    project_in_place(&mut mesh, radius)?;
    Ok(mesh)
}
