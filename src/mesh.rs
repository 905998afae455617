use std::collections::BTreeSet;

use approx::relative_eq;
use hashbrown::HashMap;
use nalgebra::Vector3;

use crate::error::{GeodesicError, GeodesicResult};

pub type Vertex = Vector3<f64>;

// Three indices into the vertex list of the owning mesh.
pub type Face = (u32, u32, u32);

/// An indexed triangle mesh.
///
/// A vertex is identified by its position in `vertices`, and faces refer to vertices only
/// through those indices. Every face index is in range and the three indices of a face are
/// distinct; `Mesh::new` checks this and the refinement operations preserve it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> GeodesicResult<Mesh> {
        let mesh = Mesh { vertices, faces };
        mesh.validate()?;
        Ok(mesh)
    }

    // For constant tables that are known to be valid.
    pub(crate) fn from_parts_unchecked(vertices: Vec<Vertex>, faces: Vec<Face>) -> Mesh {
        Mesh { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn into_parts(self) -> (Vec<Vertex>, Vec<Face>) {
        (self.vertices, self.faces)
    }

    // Checks that every face references three distinct, existing vertices.
    pub fn validate(&self) -> GeodesicResult<()> {
        let n = self.vertices.len();
        for (i, &face) in self.faces.iter().enumerate() {
            let (a, b, c) = face;
            let in_range = [a, b, c].iter().all(|&x| (x as usize) < n);
            let distinct = a != b && b != c && c != a;
            if !in_range || !distinct {
                return Err(GeodesicError::invalid_face(i, face, n));
            }
        }
        Ok(())
    }

    pub fn position(&self, index: u32) -> &Vertex {
        &self.vertices[index as usize]
    }

    // Distinct undirected edges, each as (low, high), in ascending order.
    pub fn edges(&self) -> Vec<(u32, u32)> {
        let mut edges = BTreeSet::new();
        for &(a, b, c) in self.faces.iter() {
            edges.insert(undirected(a, b));
            edges.insert(undirected(b, c));
            edges.insert(undirected(c, a));
        }
        edges.into_iter().collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    // V - E + F. Equals 2 for anything topologically a sphere.
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices.len() as i64 - self.edge_count() as i64 + self.faces.len() as i64
    }

    /// True when every directed edge occurs in exactly one face and its reverse in exactly
    /// one other, i.e. each edge borders two faces and neighbouring faces agree on winding.
    pub fn is_closed_manifold(&self) -> bool {
        if self.faces.is_empty() {
            return false;
        }

        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        for &(a, b, c) in self.faces.iter() {
            for edge in [(a, b), (b, c), (c, a)] {
                *directed.entry(edge).or_insert(0) += 1;
            }
        }

        directed
            .iter()
            .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    // Number of distinct edges touching each vertex.
    pub fn vertex_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertices.len()];
        for (a, b) in self.edges() {
            degrees[a as usize] += 1;
            degrees[b as usize] += 1;
        }
        degrees
    }

    // Lengths of the edges (a,b), (b,c), (c,a).
    pub fn face_edge_lengths(&self, face: Face) -> [f64; 3] {
        let (a, b, c) = face;
        let (va, vb, vc) = (self.position(a), self.position(b), self.position(c));
        [(vb - va).magnitude(), (vc - vb).magnitude(), (va - vc).magnitude()]
    }

    pub fn is_equilateral(&self, face: Face) -> bool {
        let [ab, bc, ca] = self.face_edge_lengths(face);
        relative_eq!(ab, bc, max_relative = 1e-9) && relative_eq!(ab, ca, max_relative = 1e-9)
    }

    // Every face equilateral, with one edge length shared by the whole mesh.
    pub fn is_regular(&self) -> bool {
        let first = match self.faces.first() {
            Some(&face) => self.face_edge_lengths(face)[0],
            None => return false,
        };
        self.faces.iter().all(|&face| {
            self.face_edge_lengths(face)
                .iter()
                .all(|&len| relative_eq!(len, first, max_relative = 1e-9))
        })
    }

    // Normals point away from the origin, i.e. faces wind counter-clockwise seen from outside.
    pub fn is_outward_oriented(&self) -> bool {
        self.faces.iter().all(|&(a, b, c)| {
            let (va, vb, vc) = (self.position(a), self.position(b), self.position(c));
            let normal = (vb - va).cross(&(vc - va));
            normal.dot(&(va + vb + vc)) > 0.
        })
    }

    // Smallest and largest distance of a vertex from the origin.
    pub fn radius_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.vertices.iter().map(|v| v.magnitude());
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), r| (min.min(r), max.max(r))))
    }

    // Angle subtended at the origin by each distinct edge. On a unit sphere this is the
    // great circle distance between the endpoints.
    pub fn edge_angles(&self) -> Vec<f64> {
        self.edges()
            .into_iter()
            .map(|(a, b)| self.position(a).angle(self.position(b)))
            .collect()
    }
}

pub(crate) fn undirected(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
