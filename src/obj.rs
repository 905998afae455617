//! Wavefront OBJ output, the hand-off format for whatever renders the sphere.

use std::io::{self, Write};

use crate::mesh::Mesh;

// One `v` line per vertex in index order, then one `f` line per face. OBJ indices are 1-based.
pub fn write_obj<W: Write>(mesh: &Mesh, name: Option<&str>, mut out: W) -> io::Result<()> {
    writeln!(
        out,
        "# {} vertices, {} faces",
        mesh.vertex_count(),
        mesh.face_count()
    )?;
    if let Some(name) = name {
        writeln!(out, "o {}", name)?;
    }

    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for &(a, b, c) in mesh.faces() {
        writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    out.flush()
}

pub fn to_obj_string(mesh: &Mesh, name: Option<&str>) -> io::Result<String> {
    let mut buf = Vec::new();
    write_obj(mesh, name, &mut buf)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod test {
    use nalgebra::Vector3;

    use super::{to_obj_string, write_obj};
    use crate::{icosahedron::icosahedron, mesh::Mesh};

    #[test]
    fn single_triangle() {
        let mesh = Mesh::new(
            vec![
                Vector3::new(0., 0., 0.),
                Vector3::new(1., 0., 0.),
                Vector3::new(0., 0.5, 0.),
            ],
            vec![(0, 1, 2)],
        )
        .unwrap();
        let obj = to_obj_string(&mesh, Some("tri")).unwrap();
        let lines: Vec<&str> = obj.lines().collect();
        assert_eq!(
            lines,
            vec![
                "# 3 vertices, 1 faces",
                "o tri",
                "v 0 0 0",
                "v 1 0 0",
                "v 0 0.5 0",
                "f 1 2 3",
            ]
        );
    }

    #[test]
    fn icosahedron_line_counts() {
        let obj = to_obj_string(&icosahedron(), None).unwrap();
        assert_eq!(obj.lines().filter(|l| l.starts_with("v ")).count(), 12);
        assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 20);
        assert!(!obj.contains("\no "));
        assert!(obj.contains("f 5 2 1"));
    }

    #[test]
    fn string_matches_written_bytes() {
        let mesh = icosahedron();
        let mut buf = Vec::new();
        write_obj(&mesh, Some("ico"), &mut buf).unwrap();
        let obj = to_obj_string(&mesh, Some("ico")).unwrap();
        assert_eq!(obj.as_bytes(), &buf[..]);
    }
}
