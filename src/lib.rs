// Do this because geometry calls for a lot of non-standard names
#![allow(non_upper_case_globals)]
pub mod config;
pub mod error;
pub mod geodesic_polyhedron;
pub mod helper;
pub mod icosahedron;
pub mod mesh;
pub mod obj;

pub use error::{GeodesicError, GeodesicResult};
pub use geodesic_polyhedron::{
    project, project_in_place, refine, subdivide, subdivide_face, MidpointSharing, Projection,
    RefineParams,
};
pub use helper::midpoint;
pub use icosahedron::{icosahedron, icosahedron_with_radius};
pub use mesh::{Face, Mesh, Vertex};
