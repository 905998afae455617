use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{check_radius, check_spacing, GeodesicError, GeodesicResult},
    helper::{midpoint, scale_all_to_radius, scale_to_radius},
    mesh::{undirected, Face, Mesh, Vertex},
};

// This angle arises from considering a rectangle with side lengths 2 and 2φ,
// where φ is the golden ratio. The two ends of a short side are neighbouring vertices of the
// icosahedron, so this is the angle one icosahedron edge subtends at the centre. The following
// then falls out of the law of cosines. Remember that φ^2 = φ+1.
// acos(1-2/(φ+2))
pub const EDGE_ANGLE: f64 = 1.1071487177940904;

// Where midpoints created by a subdivision pass end up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    // Leave midpoints on the flat parent face.
    None,
    // Push every new vertex onto the sphere of this radius.
    FixedRadius(f64),
    // Push each midpoint out to the radius of the first endpoint of its edge.
    InheritRadius,
}

impl Default for Projection {
    fn default() -> Self {
        Projection::None
    }
}

/// How midpoints of edges shared by two faces are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MidpointSharing {
    /// One midpoint per distinct edge, looked up by its unordered endpoint pair.
    /// A closed mesh with V vertices and F faces gains 3F/2 vertices per pass.
    Shared,
    /// Every face creates its own three midpoints, leaving two coincident vertices on each
    /// interior edge. A mesh gains 3F vertices per pass.
    PerFace,
}

impl Default for MidpointSharing {
    fn default() -> Self {
        MidpointSharing::Shared
    }
}

/// Parameters for `subdivide` and `refine`.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineParams {
    pub projection: Projection,
    pub midpoints: MidpointSharing,
    /// Refinement refuses to produce more faces than this.
    pub max_faces: usize,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            midpoints: MidpointSharing::default(),
            max_faces: 10_000_000,
        }
    }
}

impl RefineParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_midpoints(mut self, midpoints: MidpointSharing) -> Self {
        self.midpoints = midpoints;
        self
    }

    pub fn with_max_faces(mut self, max_faces: usize) -> Self {
        self.max_faces = max_faces;
        self
    }
}

impl From<Projection> for RefineParams {
    fn from(projection: Projection) -> Self {
        Self::default().with_projection(projection)
    }
}

/*
Splits one triangle into four, given the indices of the midpoints of its edges (a,b), (b,c)
and (c,a). Produces the three corner triangles followed by the central one:
```
        a
       / \
     m1---m3
     / \ / \
    b---m2--c
```
All four keep the winding order of the parent.
*/
pub fn subdivide_face(face: Face, mids: (u32, u32, u32)) -> [Face; 4] {
    let (a, b, c) = face;
    let (m1, m2, m3) = mids;
    [(a, m1, m3), (m1, b, m2), (m3, m2, c), (m3, m1, m2)]
}

// New vertices of a single pass, staged until the whole pass has succeeded.
struct MidpointBuilder<'a> {
    vertices: &'a [Vertex],
    projection: Projection,
    sharing: MidpointSharing,
    created: Vec<Vertex>,
    // Only used with `MidpointSharing::Shared`. Lives for one pass.
    by_edge: HashMap<(u32, u32), u32>,
}

impl<'a> MidpointBuilder<'a> {
    fn new(vertices: &'a [Vertex], params: &RefineParams, capacity: usize) -> Self {
        MidpointBuilder {
            vertices,
            projection: params.projection,
            sharing: params.midpoints,
            created: Vec::with_capacity(capacity),
            by_edge: HashMap::with_capacity(capacity),
        }
    }

    // Index of the midpoint of edge (a, b), creating the vertex if needed.
    fn index(&mut self, a: u32, b: u32) -> GeodesicResult<u32> {
        if self.sharing == MidpointSharing::Shared {
            if let Some(&index) = self.by_edge.get(&undirected(a, b)) {
                return Ok(index);
            }
        }

        let first = &self.vertices[a as usize];
        let mid = midpoint(first, &self.vertices[b as usize]);
        let target = match self.projection {
            Projection::None => None,
            Projection::FixedRadius(radius) => Some(radius),
            Projection::InheritRadius => Some(first.magnitude()),
        };
        let vertex = match target {
            None => mid,
            Some(radius) => {
                scale_to_radius(&mid, radius).ok_or(GeodesicError::DegenerateMidpoint { a, b })?
            }
        };

        // Fits, the face budget check covers the index space.
        let index = (self.vertices.len() + self.created.len()) as u32;
        self.created.push(vertex);
        if self.sharing == MidpointSharing::Shared {
            self.by_edge.insert(undirected(a, b), index);
        }
        Ok(index)
    }
}

/// Performs one class I, 2-frequency subdivision pass in place.
///
/// Every face (a, b, c) is replaced by the four faces of `subdivide_face`, and the new midpoint
/// vertices are appended after the existing ones, so old indices stay valid. On error the mesh
/// is left exactly as it was.
pub fn subdivide(mesh: &mut Mesh, params: &RefineParams) -> GeodesicResult<()> {
    if mesh.faces.is_empty() {
        return Ok(());
    }
    if let Projection::FixedRadius(radius) = params.projection {
        check_radius(radius)?;
    }

    let face_count = mesh.faces.len();
    let projected_faces = expected_face_count(face_count, 1);
    let projected_verts = mesh.vertices.len().saturating_add(face_count.saturating_mul(3));
    if projected_faces > params.max_faces || projected_verts > u32::MAX as usize {
        return Err(GeodesicError::too_large(
            face_count,
            projected_faces,
            params.max_faces,
        ));
    }

    let new_verts = match params.midpoints {
        MidpointSharing::Shared => face_count * 3 / 2,
        MidpointSharing::PerFace => face_count * 3,
    };
    let mut builder = MidpointBuilder::new(&mesh.vertices, params, new_verts);
    let mut faces = Vec::with_capacity(projected_faces);
    for &face in mesh.faces.iter() {
        let (a, b, c) = face;
        let m1 = builder.index(a, b)?;
        let m2 = builder.index(b, c)?;
        let m3 = builder.index(c, a)?;
        faces.extend_from_slice(&subdivide_face(face, (m1, m2, m3)));
    }

    let created = builder.created;
    mesh.vertices.extend(created);
    mesh.faces = faces;
    Ok(())
}

/// Applies `levels` subdivision passes. Zero levels returns the mesh unchanged.
pub fn refine(mut mesh: Mesh, levels: u32, params: &RefineParams) -> GeodesicResult<Mesh> {
    let projected = expected_face_count(mesh.face_count(), levels);
    if projected > params.max_faces {
        return Err(GeodesicError::too_large(
            mesh.face_count(),
            projected,
            params.max_faces,
        ));
    }

    debug!(
        "Refining mesh: {} faces, {} vertices, {} levels, {:?}",
        mesh.face_count(),
        mesh.vertex_count(),
        levels,
        params.projection
    );

    for level in 0..levels {
        subdivide(&mut mesh, params)?;
        debug!(
            "Level {}: {} faces, {} vertices",
            level + 1,
            mesh.face_count(),
            mesh.vertex_count()
        );
    }

    Ok(mesh)
}

// Moves every vertex onto the sphere of the given radius, keeping its direction.
// Nothing is modified unless every vertex can be projected.
pub fn project_in_place(mesh: &mut Mesh, radius: f64) -> GeodesicResult<()> {
    check_radius(radius)?;
    if let Some(index) = mesh
        .vertices
        .iter()
        .position(|v| scale_to_radius(v, radius).is_none())
    {
        return Err(GeodesicError::DegenerateVertex { index });
    }

    scale_all_to_radius(&mut mesh.vertices, radius);
    Ok(())
}

pub fn project(mut mesh: Mesh, radius: f64) -> GeodesicResult<Mesh> {
    project_in_place(&mut mesh, radius)?;
    Ok(mesh)
}

// Face count after `levels` passes, saturating at usize::MAX.
pub fn expected_face_count(faces: usize, levels: u32) -> usize {
    4usize
        .checked_pow(levels)
        .and_then(|factor| faces.checked_mul(factor))
        .unwrap_or(usize::MAX)
}

// Vertex count after `levels` passes, for a closed triangulated input. Saturates like
// `expected_face_count`.
pub fn expected_vertex_count(
    vertices: usize,
    faces: usize,
    levels: u32,
    sharing: MidpointSharing,
) -> usize {
    let mut vertices = vertices;
    let mut faces = faces;
    for _ in 0..levels {
        let added = match sharing {
            // 3F/2 without overflowing the intermediate product.
            MidpointSharing::Shared => (faces / 2).saturating_mul(3).saturating_add(faces % 2),
            MidpointSharing::PerFace => faces.saturating_mul(3),
        };
        vertices = vertices.saturating_add(added);
        if vertices == usize::MAX {
            break;
        }
        faces = faces.saturating_mul(4);
    }
    vertices
}

// Number of segments each original icosahedron edge is split into after `levels` passes,
// saturating at usize::MAX.
pub fn frequency(levels: u32) -> usize {
    1usize.checked_shl(levels).unwrap_or(usize::MAX)
}

// 2^levels as a float, which stays finite far beyond `frequency`.
fn frequency_f64(levels: u32) -> f64 {
    f64::from(levels).exp2()
}

// Gives an estimate for the mean spherical distance between neighbouring vertices at a given
// refinement level. Recall that a great circle distance is equal to the angle subtended by the
// endpoints multiplied by radius. We assume the sphere has radius 1, so that the distance equals
// the angle. This approximation gets better the more levels there are.
pub fn mean_spacing_estimate(levels: u32) -> f64 {
    // Cover the sphere (of radius 1) with circles of radius r/2 centered at each of the
    // 10n^2+2 vertices of the polyhedron. These circles should approximately cover the surface
    // of the sphere, giving us the following relation:
    // 4π=(10n^2+2)(πr^2/4)
    // Solving for r gives us
    // 16/(10n^2+2)=r^2
    let n = frequency_f64(levels);
    (16. / (10. * n * n + 2.)).sqrt()
}

// Reverses the operation of `mean_spacing_estimate`, rounding to the nearest level.
pub fn levels_for_spacing(dist: f64) -> GeodesicResult<u32> {
    let dist = check_spacing(dist)?;
    // 16/(10r^2)=n^2+1/5 so
    // 16/(10r^2)-1/5=n^2
    let n2 = 16. / (10. * dist * dist) - 1. / 5.;
    Ok(round_level(n2.max(1.).sqrt()))
}

// Gives an estimate for the mean spherical distance between neighbouring vertices at a given
// refinement level. This estimate arises from the observation that all these points are
// approximately equidistant, and that segments along one of the original edges of the
// icosahedron have an easily computable length.
// This estimate seems to be generally slightly worse than the one given by
// `mean_spacing_estimate`.
pub fn mean_spacing_estimate_alt(levels: u32) -> f64 {
    EDGE_ANGLE / frequency_f64(levels)
}

// Reverses the operation of `mean_spacing_estimate_alt`.
pub fn levels_for_spacing_alt(dist: f64) -> GeodesicResult<u32> {
    let dist = check_spacing(dist)?;
    Ok(round_level((EDGE_ANGLE / dist).max(1.)))
}

fn round_level(n: f64) -> u32 {
    n.log2().round() as u32
}
